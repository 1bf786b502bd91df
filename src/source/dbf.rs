//! Shapefile / dBase schema reader
//!
//! A shapefile keeps its attributes in a sibling `.dbf` table. Only the table
//! header is read: a 32-byte prefix followed by one 32-byte descriptor per
//! field, terminated by `0x0D`.
//!
//! Descriptor layout:
//!
//! | bytes | content |
//! |-------|---------|
//! | 0..11 | field name, NUL padded |
//! | 11 | type code (`C`, `N`, `F`, `D`, `L`, `M`, ...) |
//! | 16 | width |
//! | 17 | decimal count |

use super::{SchemaReader, SourceError, SourceSchema, file_stem, has_extension};
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

const HEADER_LEN: usize = 32;
const DESCRIPTOR_LEN: usize = 32;
const HEADER_TERMINATOR: u8 = 0x0D;
const NAME_LEN: usize = 11;
/// Widest numeric field OGR still reports as an integer
const MAX_INTEGER_WIDTH: u8 = 18;

/// One field descriptor from a dBase header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbfField {
    pub name: String,
    pub type_code: char,
    pub width: u8,
    pub decimals: u8,
}

impl DbfField {
    /// Type string in the `base[:width[.decimals]]` form
    pub fn type_string(&self) -> String {
        match self.type_code {
            'C' => format!("str:{}", self.width),
            'N' | 'F' if self.decimals > 0 => format!("float:{}.{}", self.width, self.decimals),
            'N' if self.width <= MAX_INTEGER_WIDTH => format!("int:{}", self.width),
            'N' | 'F' => format!("float:{}", self.width),
            'I' | '+' => "int".to_string(),
            'O' => "float".to_string(),
            'D' => "date".to_string(),
            'T' | '@' => "datetime".to_string(),
            'L' => "bool".to_string(),
            'M' => "str".to_string(),
            _ => format!("str:{}", self.width),
        }
    }
}

/// Read the field descriptors of a dBase table header
pub fn read_fields<R: Read>(mut reader: R) -> Result<Vec<DbfField>, String> {
    let mut header = [0u8; HEADER_LEN];
    reader
        .read_exact(&mut header)
        .map_err(|e| format!("truncated table header: {}", e))?;

    // Low bits 0b100 mark dBase level 7, which uses 48-byte descriptors
    if header[0] & 0x07 == 0x04 {
        return Err("dBase level 7 tables are not supported".to_string());
    }

    let header_len = u16::from_le_bytes([header[8], header[9]]) as usize;
    let max_fields = header_len.saturating_sub(HEADER_LEN) / DESCRIPTOR_LEN;

    let mut fields = Vec::new();
    loop {
        let mut descriptor = [0u8; DESCRIPTOR_LEN];
        match reader.read_exact(&mut descriptor[..1]) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(e.to_string()),
        }
        if descriptor[0] == HEADER_TERMINATOR {
            break;
        }
        if header_len > 0 && fields.len() >= max_fields {
            return Err(format!(
                "field descriptors overrun header length {}",
                header_len
            ));
        }
        reader
            .read_exact(&mut descriptor[1..])
            .map_err(|e| format!("truncated field descriptor {}: {}", fields.len() + 1, e))?;

        let name_end = descriptor[..NAME_LEN]
            .iter()
            .position(|b| *b == 0)
            .unwrap_or(NAME_LEN);
        let name = String::from_utf8_lossy(&descriptor[..name_end])
            .trim()
            .to_string();

        fields.push(DbfField {
            name,
            type_code: (descriptor[11] as char).to_ascii_uppercase(),
            width: descriptor[16],
            decimals: descriptor[17],
        });
    }

    Ok(fields)
}

/// Reader for `.shp` and `.dbf` sources
#[derive(Debug, Default, Clone, Copy)]
pub struct DbfReader;

impl DbfReader {
    /// Locate the attribute table belonging to `path`
    fn table_path(path: &Path) -> PathBuf {
        if has_extension(path, &["dbf"]) {
            return path.to_path_buf();
        }
        let lower = path.with_extension("dbf");
        if lower.exists() {
            return lower;
        }
        let upper = path.with_extension("DBF");
        if upper.exists() { upper } else { lower }
    }
}

impl SchemaReader for DbfReader {
    fn format_name(&self) -> &'static str {
        "ESRI Shapefile"
    }

    fn supports(&self, path: &Path) -> bool {
        has_extension(path, &["shp", "dbf"])
    }

    fn read_schema(&self, path: &Path) -> Result<SourceSchema, SourceError> {
        let table = Self::table_path(path);
        debug!(table = %table.display(), "Reading dBase header");

        let file = File::open(&table).map_err(|e| SourceError::io(&table, e))?;
        let fields =
            read_fields(BufReader::new(file)).map_err(|m| SourceError::malformed(&table, m))?;

        Ok(SourceSchema {
            name: file_stem(path),
            properties: fields
                .into_iter()
                .map(|f| {
                    let data_type = f.type_string();
                    (f.name, data_type)
                })
                .collect(),
        })
    }
}
