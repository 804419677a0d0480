//! Reader/writer loop: tick, dispatch, reply.

use std::io::{self, BufRead, Write};
use std::time::Instant;

use crate::adapter::ProtocolAdapter;
use crate::framing::{FrameDecoder, encode_reply};
use tracing::{info, warn};
use vr_rig::RigController;

/// Where the time step before each command comes from.
#[derive(Debug, Clone, Copy)]
pub enum TickSource {
    /// Seconds elapsed since the previous command.
    WallClock,
    /// A fixed step per command.
    Fixed(f64),
}

/// One peer talking to one rig.
#[derive(Debug)]
pub struct Session {
    rig: RigController,
    adapter: ProtocolAdapter,
    ticks: TickSource,
    last_tick: Instant,
}

impl Session {
    pub fn new(rig: RigController, adapter: ProtocolAdapter, ticks: TickSource) -> Self {
        Self {
            rig,
            adapter,
            ticks,
            last_tick: Instant::now(),
        }
    }

    pub fn rig(&self) -> &RigController {
        &self.rig
    }

    pub fn rig_mut(&mut self) -> &mut RigController {
        &mut self.rig
    }

    pub fn into_rig(self) -> RigController {
        self.rig
    }

    fn next_dt(&mut self) -> f64 {
        match self.ticks {
            TickSource::WallClock => {
                let now = Instant::now();
                let dt = now.duration_since(self.last_tick).as_secs_f64();
                self.last_tick = now;
                dt
            }
            TickSource::Fixed(dt) => dt,
        }
    }

    /// Tick the rig, then run one command line.
    ///
    /// A tick failure is logged and the command still runs.
    pub fn handle_line(&mut self, line: &str) -> Option<String> {
        let dt = self.next_dt();
        if let Err(err) = self.rig.tick(dt) {
            warn!(%err, dt, "tick skipped");
        }
        self.adapter.handle_line(&mut self.rig, line)
    }

    /// Serve until `reader` reaches end of input.
    ///
    /// Each reply is written with its terminator and flushed before the
    /// next command is read.
    pub fn serve<R: BufRead, W: Write>(&mut self, mut reader: R, mut writer: W) -> io::Result<()> {
        info!("session started");
        let mut decoder = FrameDecoder::new();
        let mut chunk = Vec::new();
        loop {
            chunk.clear();
            if reader.read_until(b'\r', &mut chunk)? == 0 {
                break;
            }
            let text = String::from_utf8_lossy(&chunk);
            for line in decoder.push(&text) {
                self.reply(&line, &mut writer)?;
            }
        }
        if let Some(line) = decoder.finish() {
            self.reply(&line, &mut writer)?;
        }
        info!("session ended");
        Ok(())
    }

    fn reply<W: Write>(&mut self, line: &str, writer: &mut W) -> io::Result<()> {
        if let Some(reply) = self.handle_line(line) {
            writer.write_all(encode_reply(&reply).as_bytes())?;
            writer.flush()?;
        }
        Ok(())
    }
}
