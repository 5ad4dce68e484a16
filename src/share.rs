//! Share-link codec.
//!
//! A shared puzzle is the sentence plus its mode, serialised as JSON, XORed
//! with a fixed key and base64-encoded into the `problem` query parameter.
//! The XOR step only keeps the answer from being readable in the URL; it is
//! not encryption.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::puzzle_engine::{
    error::{PuzzleError, Result},
    models::{GameMode, PuzzleRequest},
};

const SHARE_KEY: &[u8] = b"korean-word-quiz-game-secret-key";

/// Query parameter carrying the payload.
pub const SHARE_PARAM: &str = "problem";

/// Wire shape of a shared puzzle. Field names match links already in
/// circulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedPuzzle {
    #[serde(rename = "originalParagraph")]
    pub sentence: String,
    #[serde(rename = "gameMode")]
    pub mode: GameMode,
}

impl SharedPuzzle {
    pub fn new(sentence: impl Into<String>, mode: GameMode) -> Self {
        SharedPuzzle { sentence: sentence.into(), mode }
    }

    pub fn to_request(&self) -> PuzzleRequest {
        PuzzleRequest::new(self.sentence.clone(), self.mode)
    }
}

/// XOR is its own inverse, so this both obscures and restores.
fn xor_with_key(bytes: &mut [u8]) {
    for (i, b) in bytes.iter_mut().enumerate() {
        *b ^= SHARE_KEY[i % SHARE_KEY.len()];
    }
}

fn malformed(reason: impl std::fmt::Display) -> PuzzleError {
    let reason = reason.to_string();
    log::warn!("rejecting share payload: {}", reason);
    PuzzleError::MalformedShareLink(reason)
}

pub fn encode_share_payload(puzzle: &SharedPuzzle) -> Result<String> {
    let mut bytes = serde_json::to_vec(puzzle).map_err(malformed)?;
    xor_with_key(&mut bytes);
    Ok(STANDARD.encode(bytes))
}

pub fn decode_share_payload(payload: &str) -> Result<SharedPuzzle> {
    let mut bytes = STANDARD.decode(payload.trim()).map_err(malformed)?;
    xor_with_key(&mut bytes);
    let json = String::from_utf8(bytes).map_err(malformed)?;
    let puzzle: SharedPuzzle = serde_json::from_str(&json).map_err(malformed)?;
    if puzzle.sentence.trim().is_empty() {
        return Err(malformed("empty sentence"));
    }
    Ok(puzzle)
}

// ---------------------------------------------------------------------------
// URL handling
// ---------------------------------------------------------------------------

/// Percent-encode the characters base64 can produce that are not URL-safe.
fn escape_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '+' => out.push_str("%2B"),
            '/' => out.push_str("%2F"),
            '=' => out.push_str("%3D"),
            _ => out.push(c),
        }
    }
    out
}

/// Decode `%XX` escapes; anything malformed is an error.
fn unescape_component(s: &str) -> Result<String> {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = s.get(i + 1..i + 3).ok_or_else(|| malformed("truncated escape"))?;
            let byte = u8::from_str_radix(hex, 16).map_err(malformed)?;
            out.push(byte);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).map_err(malformed)
}

/// `base` with the encoded puzzle appended as `?problem=...`.
pub fn share_url(base: &str, puzzle: &SharedPuzzle) -> Result<String> {
    let payload = encode_share_payload(puzzle)?;
    let sep = if base.contains('?') { '&' } else { '?' };
    Ok(format!("{}{}{}={}", base, sep, SHARE_PARAM, escape_component(&payload)))
}

/// Pull the `problem` parameter out of a URL and decode it.
pub fn parse_share_url(url: &str) -> Result<SharedPuzzle> {
    let query = url
        .split_once('?')
        .map(|(_, q)| q)
        .ok_or_else(|| malformed("no query string"))?;
    let query = query.split('#').next().unwrap_or(query);

    let value = query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == SHARE_PARAM)
        .map(|(_, value)| value)
        .ok_or_else(|| malformed(format!("missing '{}' parameter", SHARE_PARAM)))?;

    decode_share_payload(&unescape_component(value)?)
}
