// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Versioned, length-prefixed framing for key material.
//!
//! Layout: `[version:u8]` followed by any sequence of `u32` BE words and
//! `[len:u32 BE][len bytes]` fields, in the order the writer emitted them.

/// Current framing version.
pub(crate) const VERSION: u8 = 1;

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub(crate) enum FrameError {
    #[error("input is empty")]
    Empty,

    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),

    #[error("truncated input at offset {0}")]
    Truncated(usize),

    #[error("{0} trailing bytes")]
    TrailingBytes(usize),
}

#[derive(Debug)]
pub(crate) struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    pub(crate) fn new() -> Self {
        Self { buf: vec![VERSION] }
    }

    pub(crate) fn put_u32(mut self, value: u32) -> Self {
        self.buf.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub(crate) fn put_bytes(mut self, bytes: &[u8]) -> Self {
        self.buf.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
        self.buf.extend_from_slice(bytes);
        self
    }

    pub(crate) fn finish(self) -> Vec<u8> {
        self.buf
    }
}

#[derive(Debug)]
pub(crate) struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    /// Validate the version byte and position the reader after it.
    pub(crate) fn new(data: &'a [u8]) -> Result<Self, FrameError> {
        let (&version, _) = data.split_first().ok_or(FrameError::Empty)?;
        if version != VERSION {
            return Err(FrameError::UnsupportedVersion(version));
        }
        Ok(Self { data, offset: 1 })
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], FrameError> {
        let end = self
            .offset
            .checked_add(len)
            .filter(|&end| end <= self.data.len())
            .ok_or(FrameError::Truncated(self.offset))?;

        let data = self.data;
        let slice = &data[self.offset..end];
        self.offset = end;
        Ok(slice)
    }

    pub(crate) fn u32(&mut self) -> Result<u32, FrameError> {
        let mut word = [0u8; 4];
        word.copy_from_slice(self.take(4)?);
        Ok(u32::from_be_bytes(word))
    }

    pub(crate) fn bytes(&mut self) -> Result<&'a [u8], FrameError> {
        let len = self.u32()? as usize;
        self.take(len)
    }

    /// Ensure every byte was consumed.
    pub(crate) fn finish(self) -> Result<(), FrameError> {
        match self.data.len() - self.offset {
            0 => Ok(()),
            trailing => Err(FrameError::TrailingBytes(trailing)),
        }
    }
}
