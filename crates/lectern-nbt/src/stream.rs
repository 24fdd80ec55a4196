use std::io::{self, BufRead, BufReader, Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use flate2::bufread::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::compound::Compound;
use crate::error::NbtError;
use crate::list::List;
use crate::tag::{Tag, TagType};

/// Deepest nesting of compounds and lists accepted by the decoder.
pub const MAX_DEPTH: usize = 512;

// Upper bound on speculative allocation from an untrusted length prefix.
const PREALLOC_LIMIT: usize = 64 * 1024;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Decodes one named tag from `reader`.
pub fn decode<R: Read>(reader: &mut R) -> Result<(String, Tag), NbtError> {
    let tag_type = read_type(reader)?;
    if tag_type == TagType::End {
        return Ok((String::new(), Tag::End));
    }
    let name = read_string(reader)?;
    let tag = read_payload(reader, tag_type, 0)?;
    Ok((name, tag))
}

/// Encodes `tag` under `name`. Compound children are written in insertion order.
pub fn encode<W: Write>(name: &str, tag: &Tag, writer: &mut W) -> Result<(), NbtError> {
    writer.write_u8(tag.get_type_id())?;
    if !matches!(tag, Tag::End) {
        write_string(writer, name)?;
    }
    write_payload(writer, tag)
}

impl Tag {
    pub fn read<R: Read>(reader: &mut R) -> Result<(String, Tag), NbtError> {
        decode(reader)
    }

    pub fn write<W: Write>(&self, writer: &mut W, name: &str) -> Result<(), NbtError> {
        encode(name, self, writer)
    }
}

fn read_type<R: Read>(reader: &mut R) -> Result<TagType, NbtError> {
    let id = reader.read_u8()?;
    TagType::from_id(id).ok_or(NbtError::InvalidTagType(id))
}

fn read_string<R: Read>(reader: &mut R) -> Result<String, NbtError> {
    let length = reader.read_u16::<BigEndian>()?;
    let mut bytes = vec![0u8; length as usize];
    reader.read_exact(&mut bytes)?;
    String::from_utf8(bytes).map_err(|_| NbtError::InvalidUtf8)
}

fn read_length<R: Read>(reader: &mut R) -> Result<usize, NbtError> {
    let length = reader.read_i32::<BigEndian>()?;
    usize::try_from(length).map_err(|_| NbtError::NegativeLength(length))
}

fn read_payload<R: Read>(reader: &mut R, tag_type: TagType, depth: usize) -> Result<Tag, NbtError> {
    let tag = match tag_type {
        TagType::End => Tag::End,
        TagType::Byte => Tag::Byte(reader.read_i8()?),
        TagType::Short => Tag::Short(reader.read_i16::<BigEndian>()?),
        TagType::Int => Tag::Int(reader.read_i32::<BigEndian>()?),
        TagType::Long => Tag::Long(reader.read_i64::<BigEndian>()?),
        TagType::Float => Tag::Float(reader.read_f32::<BigEndian>()?),
        TagType::Double => Tag::Double(reader.read_f64::<BigEndian>()?),
        TagType::ByteArray => {
            let length = read_length(reader)?;
            let mut bytes = Vec::with_capacity(length.min(PREALLOC_LIMIT));
            reader.by_ref().take(length as u64).read_to_end(&mut bytes)?;
            if bytes.len() != length {
                return Err(NbtError::Truncated);
            }
            Tag::ByteArray(bytes)
        }
        TagType::String => Tag::String(read_string(reader)?),
        TagType::List => Tag::List(read_list(reader, depth + 1)?),
        TagType::Compound => Tag::Compound(read_compound(reader, depth + 1)?),
        TagType::IntArray => {
            let length = read_length(reader)?;
            let mut ints = Vec::with_capacity(length.min(PREALLOC_LIMIT));
            for _ in 0..length {
                ints.push(reader.read_i32::<BigEndian>()?);
            }
            Tag::IntArray(ints)
        }
        TagType::LongArray => {
            let length = read_length(reader)?;
            let mut longs = Vec::with_capacity(length.min(PREALLOC_LIMIT));
            for _ in 0..length {
                longs.push(reader.read_i64::<BigEndian>()?);
            }
            Tag::LongArray(longs)
        }
    };
    Ok(tag)
}

fn read_list<R: Read>(reader: &mut R, depth: usize) -> Result<List, NbtError> {
    if depth > MAX_DEPTH {
        return Err(NbtError::DepthLimitExceeded);
    }
    let element = read_type(reader)?;
    let raw_length = reader.read_i32::<BigEndian>()?;
    let length = usize::try_from(raw_length).map_err(|_| NbtError::NegativeLength(raw_length))?;
    if element == TagType::End && length > 0 {
        return Err(NbtError::NonEmptyEndList(raw_length));
    }

    let mut items = Vec::with_capacity(length.min(PREALLOC_LIMIT));
    for _ in 0..length {
        items.push(read_payload(reader, element, depth)?);
    }
    Ok(List::from_parts(element, items))
}

fn read_compound<R: Read>(reader: &mut R, depth: usize) -> Result<Compound, NbtError> {
    if depth > MAX_DEPTH {
        return Err(NbtError::DepthLimitExceeded);
    }
    let mut compound = Compound::new();
    loop {
        let tag_type = read_type(reader)?;
        if tag_type == TagType::End {
            break;
        }
        let name = read_string(reader)?;
        let tag = read_payload(reader, tag_type, depth)?;
        compound.insert(name, tag);
    }
    Ok(compound)
}

fn write_string<W: Write>(writer: &mut W, value: &str) -> Result<(), NbtError> {
    let length = u16::try_from(value.len()).map_err(|_| NbtError::StringTooLong(value.len()))?;
    writer.write_u16::<BigEndian>(length)?;
    writer.write_all(value.as_bytes())?;
    Ok(())
}

fn write_payload<W: Write>(writer: &mut W, tag: &Tag) -> Result<(), NbtError> {
    match tag {
        Tag::End => {}
        Tag::Byte(v) => writer.write_i8(*v)?,
        Tag::Short(v) => writer.write_i16::<BigEndian>(*v)?,
        Tag::Int(v) => writer.write_i32::<BigEndian>(*v)?,
        Tag::Long(v) => writer.write_i64::<BigEndian>(*v)?,
        Tag::Float(v) => writer.write_f32::<BigEndian>(*v)?,
        Tag::Double(v) => writer.write_f64::<BigEndian>(*v)?,
        Tag::ByteArray(v) => {
            writer.write_i32::<BigEndian>(v.len() as i32)?;
            writer.write_all(v)?;
        }
        Tag::String(v) => write_string(writer, v)?,
        Tag::List(list) => {
            writer.write_u8(list.element_type().id())?;
            writer.write_i32::<BigEndian>(list.len() as i32)?;
            for item in list {
                write_payload(writer, item)?;
            }
        }
        Tag::Compound(compound) => {
            for (name, child) in compound.iter() {
                encode(name, child, writer)?;
            }
            writer.write_u8(TagType::End.id())?;
        }
        Tag::IntArray(v) => {
            writer.write_i32::<BigEndian>(v.len() as i32)?;
            for &i in v {
                writer.write_i32::<BigEndian>(i)?;
            }
        }
        Tag::LongArray(v) => {
            writer.write_i32::<BigEndian>(v.len() as i32)?;
            for &l in v {
                writer.write_i64::<BigEndian>(l)?;
            }
        }
    }
    Ok(())
}

/// A complete tag file: one named root tag, optionally gzip-compressed on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct NbtFile {
    pub name: String,
    pub root: Tag,
}

impl NbtFile {
    pub fn new(name: impl Into<String>, root: Tag) -> Self {
        NbtFile {
            name: name.into(),
            root,
        }
    }

    pub fn read<R: Read>(reader: &mut R) -> Result<Self, NbtError> {
        let (name, root) = decode(reader)?;
        Ok(NbtFile { name, root })
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), NbtError> {
        encode(&self.name, &self.root, writer)
    }

    pub fn read_gzip<R: Read>(reader: &mut R) -> Result<Self, NbtError> {
        let mut decoder = GzDecoder::new(BufReader::new(reader));
        Self::read(&mut decoder)
    }

    pub fn write_gzip<W: Write>(&self, writer: &mut W) -> Result<(), NbtError> {
        let mut encoder = GzEncoder::new(writer, Compression::default());
        self.write(&mut encoder)?;
        encoder.finish()?;
        Ok(())
    }

    /// Reads a file that may or may not be gzip-compressed, judging by its first two bytes.
    pub fn read_auto<R: Read>(reader: &mut R) -> Result<Self, NbtError> {
        let mut buffered = BufReader::new(reader);
        let compressed = buffered.fill_buf()?.starts_with(&GZIP_MAGIC);
        if compressed {
            let mut decoder = GzDecoder::new(buffered);
            Self::read(&mut decoder)
        } else {
            Self::read(&mut buffered)
        }
    }

    pub fn root_compound(&self) -> Option<&Compound> {
        self.root.as_compound()
    }
}

pub fn decode_slice(bytes: &[u8]) -> Result<(String, Tag), NbtError> {
    let mut cursor = io::Cursor::new(bytes);
    decode(&mut cursor)
}
