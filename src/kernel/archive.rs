//! Store-only ZIP writer.
//!
//! Layout: for each entry a 30-byte local header, the name and the raw bytes;
//! then one 46-byte central directory record per entry; then the 22-byte end
//! of central directory record. Integers are little-endian, timestamps zero.

pub const ARCHIVE_FILE_NAME: &str = "project_files.zip";

const LOCAL_HEADER_SIGNATURE: u32 = 0x0403_4b50;
const CENTRAL_HEADER_SIGNATURE: u32 = 0x0201_4b50;
const END_OF_CENTRAL_DIR_SIGNATURE: u32 = 0x0605_4b50;

pub const LOCAL_HEADER_LEN: usize = 30;
pub const CENTRAL_HEADER_LEN: usize = 46;
pub const END_OF_CENTRAL_DIR_LEN: usize = 22;

const VERSION: u16 = 20;
const METHOD_STORE: u16 = 0;
const FLAG_UTF8_NAME: u16 = 1 << 11;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArchiveError {
    #[error("too many entries for an archive: {0}")]
    TooManyEntries(usize),
    #[error("entry name too long: {0}")]
    NameTooLong(String),
    #[error("entry too large: {0}")]
    EntryTooLarge(String),
    #[error("archive exceeds 4 GiB")]
    ArchiveTooLarge,
}

struct CentralRecord {
    name_len: u16,
    flags: u16,
    crc: u32,
    size: u32,
    offset: u32,
}

pub struct ArchiveWriter {
    out: Vec<u8>,
    records: Vec<CentralRecord>,
    names: Vec<u8>,
}

impl ArchiveWriter {
    pub fn new() -> Self {
        Self {
            out: Vec::new(),
            records: Vec::new(),
            names: Vec::new(),
        }
    }

    pub fn add(&mut self, name: &str, content: &[u8]) -> Result<(), ArchiveError> {
        if self.records.len() >= usize::from(u16::MAX) {
            return Err(ArchiveError::TooManyEntries(self.records.len() + 1));
        }
        let name_len =
            u16::try_from(name.len()).map_err(|_| ArchiveError::NameTooLong(name.to_string()))?;
        let size = u32::try_from(content.len())
            .map_err(|_| ArchiveError::EntryTooLarge(name.to_string()))?;
        let offset = u32::try_from(self.out.len()).map_err(|_| ArchiveError::ArchiveTooLarge)?;
        let flags = if name.is_ascii() { 0 } else { FLAG_UTF8_NAME };
        let crc = crc32fast::hash(content);

        put_u32(&mut self.out, LOCAL_HEADER_SIGNATURE);
        put_u16(&mut self.out, VERSION);
        put_u16(&mut self.out, flags);
        put_u16(&mut self.out, METHOD_STORE);
        put_u16(&mut self.out, 0); // mod time
        put_u16(&mut self.out, 0); // mod date
        put_u32(&mut self.out, crc);
        put_u32(&mut self.out, size); // compressed
        put_u32(&mut self.out, size); // uncompressed
        put_u16(&mut self.out, name_len);
        put_u16(&mut self.out, 0); // extra
        self.out.extend_from_slice(name.as_bytes());
        self.out.extend_from_slice(content);

        self.names.extend_from_slice(name.as_bytes());
        self.records.push(CentralRecord {
            name_len,
            flags,
            crc,
            size,
            offset,
        });
        Ok(())
    }

    pub fn finish(mut self) -> Result<Vec<u8>, ArchiveError> {
        let central_offset =
            u32::try_from(self.out.len()).map_err(|_| ArchiveError::ArchiveTooLarge)?;
        let count = self.records.len() as u16;

        let mut name_start = 0usize;
        for record in &self.records {
            let name_end = name_start + usize::from(record.name_len);
            put_u32(&mut self.out, CENTRAL_HEADER_SIGNATURE);
            put_u16(&mut self.out, VERSION); // made by
            put_u16(&mut self.out, VERSION); // needed
            put_u16(&mut self.out, record.flags);
            put_u16(&mut self.out, METHOD_STORE);
            put_u16(&mut self.out, 0);
            put_u16(&mut self.out, 0);
            put_u32(&mut self.out, record.crc);
            put_u32(&mut self.out, record.size);
            put_u32(&mut self.out, record.size);
            put_u16(&mut self.out, record.name_len);
            put_u16(&mut self.out, 0); // extra
            put_u16(&mut self.out, 0); // comment
            put_u16(&mut self.out, 0); // disk start
            put_u16(&mut self.out, 0); // internal attrs
            put_u32(&mut self.out, 0); // external attrs
            put_u32(&mut self.out, record.offset);
            self.out.extend_from_slice(&self.names[name_start..name_end]);
            name_start = name_end;
        }

        let central_end =
            u32::try_from(self.out.len()).map_err(|_| ArchiveError::ArchiveTooLarge)?;
        put_u32(&mut self.out, END_OF_CENTRAL_DIR_SIGNATURE);
        put_u16(&mut self.out, 0); // this disk
        put_u16(&mut self.out, 0); // central directory disk
        put_u16(&mut self.out, count);
        put_u16(&mut self.out, count);
        put_u32(&mut self.out, central_end - central_offset);
        put_u32(&mut self.out, central_offset);
        put_u16(&mut self.out, 0); // comment
        Ok(self.out)
    }
}

impl Default for ArchiveWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a complete archive from `(name, text)` pairs in iteration order.
pub fn build_archive<'a, I>(entries: I) -> Result<Vec<u8>, ArchiveError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut writer = ArchiveWriter::new();
    for (name, content) in entries {
        writer.add(name, content.as_bytes())?;
    }
    writer.finish()
}

fn put_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn put_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/archive.rs"]
mod tests;
