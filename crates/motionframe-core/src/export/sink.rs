use super::frames::Frame;
use anyhow::Result;
use std::io::Write;

/// Consumer of resolved frames (rasterizer, encoder, serializer).
pub trait FrameSink {
    /// Receives frames in index order.
    fn write_frame(&mut self, frame: &Frame) -> Result<()>;

    /// Called once after the last frame of a completed export.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Keeps every frame in memory.
#[derive(Debug, Default)]
pub struct FrameCollector {
    pub frames: Vec<Frame>,
    pub finished: bool,
}

impl FrameCollector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameSink for FrameCollector {
    fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        self.frames.push(frame.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}

/// Writes one JSON object per frame, newline separated.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> FrameSink for JsonLinesSink<W> {
    fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        serde_json::to_writer(&mut self.writer, frame)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
