//! SSH wire primitives: big-endian `u32` and length-prefixed strings.

use crate::errors::FrameError;

/// Cursor over an SSH-encoded buffer.
#[derive(Debug, Clone)]
pub(crate) struct SshReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> SshReader<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        SshReader { buf, pos: 0 }
    }

    pub(crate) fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub(crate) fn read_bytes(&mut self, field: &'static str, len: usize) -> Result<&'a [u8], FrameError> {
        if len > self.remaining() {
            return Err(FrameError::Truncated {
                field,
                needed: len,
                remaining: self.remaining(),
            });
        }
        let out = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(out)
    }

    pub(crate) fn read_u32(&mut self, field: &'static str) -> Result<u32, FrameError> {
        let bytes = self.read_bytes(field, 4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Reads `u32 length ‖ bytes`.
    pub(crate) fn read_string(&mut self, field: &'static str) -> Result<&'a [u8], FrameError> {
        let len = self.read_u32(field)? as usize;
        self.read_bytes(field, len)
    }

    pub(crate) fn read_utf8(&mut self, field: &'static str) -> Result<&'a str, FrameError> {
        let bytes = self.read_string(field)?;
        core::str::from_utf8(bytes).map_err(|_| FrameError::InvalidUtf8 { field })
    }

    /// The rest of the buffer, consuming it.
    pub(crate) fn read_rest(&mut self) -> &'a [u8] {
        let out = &self.buf[self.pos..];
        self.pos = self.buf.len();
        out
    }

    /// Fails unless every byte has been consumed.
    pub(crate) fn finish(&self) -> Result<(), FrameError> {
        match self.remaining() {
            0 => Ok(()),
            extra => Err(FrameError::TrailingBytes(extra)),
        }
    }
}

/// Appends `u32 length ‖ bytes` to `out`.
pub(crate) fn put_string(out: &mut Vec<u8>, bytes: &[u8]) {
    out.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
    out.extend_from_slice(bytes);
}
