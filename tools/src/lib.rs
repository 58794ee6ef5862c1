use nbtree::{compress, DeOpts};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Split raw input into documents. With `base64` set every non-empty line is
/// one base64 encoded document, otherwise the whole input is one document.
pub fn documents(input: &[u8], base64: bool) -> Result<Vec<Vec<u8>>> {
    if !base64 {
        return Ok(vec![input.to_vec()]);
    }

    let text = std::str::from_utf8(input)?;
    let mut docs = vec![];
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        docs.push(base64::decode(line)?);
    }
    Ok(docs)
}

/// Inflate and decode one document, rendering it as JSON.
pub fn dump(doc: &[u8], opts: DeOpts, pretty: bool) -> Result<String> {
    let value = compress::from_compressed_bytes(doc, opts)?;

    Ok(if pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    })
}
