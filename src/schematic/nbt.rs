//! Minimal reader for the tagged binary container format.
//!
//! Only the subset needed to decode structure files is implemented: all tag
//! payloads parse, but there is no writer. Integers are big-endian; strings
//! are length-prefixed UTF-8.

use crate::error::{PatternError, Result};
use std::collections::HashMap;

/// Tag type ids as they appear on the wire.
const TAG_END: u8 = 0;
const TAG_BYTE: u8 = 1;
const TAG_SHORT: u8 = 2;
const TAG_INT: u8 = 3;
const TAG_LONG: u8 = 4;
const TAG_FLOAT: u8 = 5;
const TAG_DOUBLE: u8 = 6;
const TAG_BYTE_ARRAY: u8 = 7;
const TAG_STRING: u8 = 8;
const TAG_LIST: u8 = 9;
const TAG_COMPOUND: u8 = 10;
const TAG_INT_ARRAY: u8 = 11;
const TAG_LONG_ARRAY: u8 = 12;

/// A parsed tag value.
#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(Vec<Tag>),
    Compound(HashMap<String, Tag>),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

impl Tag {
    /// Widen any integral tag to i64.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Tag::Byte(v) => Some(*v as i64),
            Tag::Short(v) => Some(*v as i64),
            Tag::Int(v) => Some(*v as i64),
            Tag::Long(v) => Some(*v),
            _ => None,
        }
    }

    /// Borrow the compound map, if this is a compound.
    pub fn compound(&self) -> Option<&HashMap<String, Tag>> {
        match self {
            Tag::Compound(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a field of a compound tag.
    pub fn get(&self, name: &str) -> Option<&Tag> {
        self.compound().and_then(|map| map.get(name))
    }
}

/// Read the root compound of a tagged binary document.
///
/// Returns the root's name (usually empty) and its payload.
pub fn read_root(data: &[u8]) -> Result<(String, Tag)> {
    let mut reader = Reader::new(data);
    let id = reader.read_u8()?;
    if id != TAG_COMPOUND {
        return Err(PatternError::Malformed(format!(
            "root tag has type {}, expected a compound",
            id
        )));
    }
    let name = reader.read_string()?;
    let tag = reader.read_payload(TAG_COMPOUND)?;
    Ok((name, tag))
}

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.pos + n > self.data.len() {
            return Err(PatternError::Malformed(
                "unexpected end of tagged data".to_string(),
            ));
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn read_i16(&mut self) -> Result<i16> {
        let bytes = self.take(2)?;
        Ok(i16::from_be_bytes([bytes[0], bytes[1]]))
    }

    fn read_i32(&mut self) -> Result<i32> {
        let bytes = self.take(4)?;
        Ok(i32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn read_i64(&mut self) -> Result<i64> {
        let bytes = self.take(8)?;
        let mut buf = [0u8; 8];
        buf.copy_from_slice(bytes);
        Ok(i64::from_be_bytes(buf))
    }

    fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_bits(self.read_i32()? as u32))
    }

    fn read_f64(&mut self) -> Result<f64> {
        Ok(f64::from_bits(self.read_i64()? as u64))
    }

    fn read_string(&mut self) -> Result<String> {
        let len = self.read_i16()? as u16 as usize;
        let bytes = self.take(len)?;
        // Names are modified UTF-8 on the wire; lossy decoding keeps the
        // non-ASCII edge cases from aborting a whole load.
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    fn read_len(&mut self) -> Result<usize> {
        let len = self.read_i32()?;
        if len < 0 {
            return Err(PatternError::Malformed(format!(
                "negative collection length {}",
                len
            )));
        }
        Ok(len as usize)
    }

    fn read_payload(&mut self, id: u8) -> Result<Tag> {
        match id {
            TAG_BYTE => Ok(Tag::Byte(self.read_u8()? as i8)),
            TAG_SHORT => Ok(Tag::Short(self.read_i16()?)),
            TAG_INT => Ok(Tag::Int(self.read_i32()?)),
            TAG_LONG => Ok(Tag::Long(self.read_i64()?)),
            TAG_FLOAT => Ok(Tag::Float(self.read_f32()?)),
            TAG_DOUBLE => Ok(Tag::Double(self.read_f64()?)),
            TAG_BYTE_ARRAY => {
                let len = self.read_len()?;
                let bytes = self.take(len)?;
                Ok(Tag::ByteArray(bytes.iter().map(|&b| b as i8).collect()))
            }
            TAG_STRING => Ok(Tag::String(self.read_string()?)),
            TAG_LIST => {
                let element_id = self.read_u8()?;
                let len = self.read_len()?;
                if element_id == TAG_END && len > 0 {
                    return Err(PatternError::Malformed(
                        "non-empty list of end tags".to_string(),
                    ));
                }
                let mut items = Vec::with_capacity(len);
                for _ in 0..len {
                    items.push(self.read_payload(element_id)?);
                }
                Ok(Tag::List(items))
            }
            TAG_COMPOUND => {
                let mut map = HashMap::new();
                loop {
                    let child_id = self.read_u8()?;
                    if child_id == TAG_END {
                        break;
                    }
                    let name = self.read_string()?;
                    let value = self.read_payload(child_id)?;
                    map.insert(name, value);
                }
                Ok(Tag::Compound(map))
            }
            TAG_INT_ARRAY => {
                let len = self.read_len()?;
                let mut items = Vec::with_capacity(len);
                for _ in 0..len {
                    items.push(self.read_i32()?);
                }
                Ok(Tag::IntArray(items))
            }
            TAG_LONG_ARRAY => {
                let len = self.read_len()?;
                let mut items = Vec::with_capacity(len);
                for _ in 0..len {
                    items.push(self.read_i64()?);
                }
                Ok(Tag::LongArray(items))
            }
            other => Err(PatternError::Malformed(format!(
                "unknown tag type {}",
                other
            ))),
        }
    }
}
