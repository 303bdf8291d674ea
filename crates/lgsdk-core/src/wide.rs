//! Wide-character string marshalling.
//!
//! The vendor libraries are Windows DLLs, so `wchar_t` is a UTF-16 code unit.

/// Native wide character.
pub type WChar = u16;

/// Encode `text` as a nul-terminated UTF-16 buffer.
///
/// The native side stops reading at the first nul, so text containing an
/// interior nul is truncated there.
pub fn to_wide(text: &str) -> Vec<WChar> {
    text.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Decode a caller-owned buffer up to its first nul (or its end).
pub fn from_wide(buffer: &[WChar]) -> String {
    let len = buffer.iter().position(|&c| c == 0).unwrap_or(buffer.len());
    String::from_utf16_lossy(&buffer[..len])
}

/// Decode a nul-terminated wide string returned by the native layer.
///
/// A null pointer decodes to an empty string.
///
/// # Safety
///
/// `ptr` must be null or point to a nul-terminated sequence of `WChar`
/// that stays valid for the duration of the call.
pub unsafe fn from_wide_ptr(ptr: *const WChar) -> String {
    if ptr.is_null() {
        return String::new();
    }
    let mut len = 0usize;
    // SAFETY: the caller guarantees a terminating nul within the allocation.
    unsafe {
        while *ptr.add(len) != 0 {
            len += 1;
        }
        String::from_utf16_lossy(std::slice::from_raw_parts(ptr, len))
    }
}
