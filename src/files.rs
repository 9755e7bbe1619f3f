//! Input discovery, output path resolution and document load/save
//!
//! Documents are read and written through `encoding_rs` so that bundles kept
//! in a legacy encoding survive a round trip. Output keeps the key order of
//! the document, uses the requested indentation and writes non-ASCII
//! characters literally.

use crate::error::{Error, Result};
use crate::tree::{TreeError, kind_name};
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE};
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> Error + '_ {
    move |source| Error::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some("json")
}

/// All `*.json` files directly inside `dir`, sorted by name
pub fn find_json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error(dir))? {
        let path = entry.map_err(io_error(dir))?.path();
        if path.is_file() && is_json(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Resolve the source file from a file or directory argument
///
/// A directory must contain exactly one json file.
pub fn resolve_input(path: &Path) -> Result<PathBuf> {
    if path.is_dir() {
        let mut files = find_json_files(path)?;
        return match files.len() {
            0 => Err(Error::NoInputFiles(path.to_path_buf())),
            1 => Ok(files.remove(0)),
            _ => Err(Error::AmbiguousInput {
                dir: path.to_path_buf(),
                files: files
                    .iter()
                    .filter_map(|f| f.file_name()?.to_str().map(str::to_owned))
                    .collect(),
            }),
        };
    }

    if !is_json(path) {
        return Err(Error::NotJson(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(Error::InputNotFound(path.to_path_buf()));
    }
    Ok(path.to_path_buf())
}

/// File name without its last extension: `locales/pt-BR.json` → `pt-BR`
pub fn file_name_without_extension(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Refuse to translate `en.json` into `EN`
pub fn ensure_different_language(input: &Path, target_locale: &str) -> Result<()> {
    let name = file_name_without_extension(input);
    if name.eq_ignore_ascii_case(target_locale) {
        return Err(Error::SameLanguage(target_locale.to_string()));
    }
    Ok(())
}

/// Output file name: the explicit one, or `<locale>.json`; `.json` is appended when missing
pub fn output_file_name(output: Option<&str>, target_locale: &str) -> String {
    let name = match output {
        Some(name) => name.to_string(),
        None => format!("{}.json", target_locale.to_lowercase()),
    };
    if name.ends_with(".json") {
        name
    } else {
        format!("{}.json", name)
    }
}

/// Place the output next to the input and check it against the run mode
///
/// Extend mode requires the file to exist; otherwise an existing file is only
/// replaced when `override_existing` is set.
pub fn resolve_output(
    input: &Path,
    output: Option<&str>,
    target_locale: &str,
    extend: bool,
    override_existing: bool,
) -> Result<PathBuf> {
    let dir = input.parent().unwrap_or_else(|| Path::new(""));
    let path = dir.join(output_file_name(output, target_locale));

    match (path.exists(), extend) {
        (false, true) => Err(Error::MissingExtendTarget(path)),
        (true, false) if !override_existing => Err(Error::OutputExists(path)),
        _ => Ok(path),
    }
}

/// Read and parse a JSON document stored in `encoding`
///
/// The root must be an object or an array.
pub fn load_document(path: &Path, encoding: &'static Encoding) -> Result<Value> {
    let bytes = fs::read(path).map_err(io_error(path))?;
    let text = encoding
        .decode_without_bom_handling_and_without_replacement(strip_bom(&bytes, encoding))
        .ok_or_else(|| Error::Undecodable {
            path: path.to_path_buf(),
            encoding: encoding.name(),
        })?;

    let document: Value = serde_json::from_str(&text).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })?;

    match document {
        Value::Object(_) | Value::Array(_) => {
            debug!(path = %path.display(), "loaded document");
            Ok(document)
        }
        other => Err(TreeError::UnsupportedValueKind(kind_name(&other)).into()),
    }
}

fn strip_bom<'a>(bytes: &'a [u8], encoding: &'static Encoding) -> &'a [u8] {
    match Encoding::for_bom(bytes) {
        Some((bom_encoding, len)) if bom_encoding == encoding => &bytes[len..],
        _ => bytes,
    }
}

/// Serialize with `indent` spaces per level, non-ASCII written literally
pub fn to_json_string(document: &Value, indent: usize) -> Result<String> {
    let indent = " ".repeat(indent);
    let mut buffer = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(indent.as_bytes()));
    document
        .serialize(&mut serializer)
        .map_err(Error::Serialize)?;

    // serde_json only ever emits UTF-8
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Write `document` to `path` in `encoding`
pub fn save_document(
    path: &Path,
    document: &Value,
    indent: usize,
    encoding: &'static Encoding,
) -> Result<()> {
    let text = to_json_string(document, indent)?;
    let bytes = encode(&text, encoding)?;

    fs::write(path, &bytes).map_err(io_error(path))?;
    info!(path = %path.display(), encoding = encoding.name(), "results saved");
    Ok(())
}

/// Encode `text` in exactly `encoding`
///
/// `encoding_rs` only decodes UTF-16, so both byte orders are written here,
/// with a byte order mark.
fn encode(text: &str, encoding: &'static Encoding) -> Result<Vec<u8>> {
    let utf16 = |to_bytes: fn(u16) -> [u8; 2]| -> Vec<u8> {
        std::iter::once(0xFEFF)
            .chain(text.encode_utf16())
            .flat_map(to_bytes)
            .collect()
    };

    if encoding == UTF_16LE {
        return Ok(utf16(u16::to_le_bytes));
    }
    if encoding == UTF_16BE {
        return Ok(utf16(u16::to_be_bytes));
    }

    let (bytes, used, unmappable) = encoding.encode(text);
    if unmappable || used != encoding {
        return Err(Error::Unencodable {
            encoding: encoding.name(),
        });
    }
    Ok(bytes.into_owned())
}
