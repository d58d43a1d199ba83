//! Label cropping

/// Crop `text` to at most `length` characters plus an ellipsis.
///
/// Text longer than `length` is cut to `length` characters. If the last space
/// in what remains lies past the halfway point, the cut moves to just after
/// that space. Shorter text is returned unchanged.
pub fn crop(text: &str, length: usize) -> String {
    if text.chars().count() <= length {
        return text.to_string();
    }

    let mut cropped: String = text.chars().take(length).collect();
    if let Some(space) = cropped.rfind(' ')
        && cropped[..space].chars().count() > length / 2
    {
        cropped.truncate(space + 1);
    }
    cropped.push_str("...");
    cropped
}
