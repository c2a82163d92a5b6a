/*!
 * Prompt construction and batch marker encoding.
 *
 * Multiple texts ride in one backend call, delimited by `<<ENTRY_n>>`
 * markers and a final `<<END>>`. The model is instructed to echo the
 * markers back; decoding scans for them in order and fails the whole
 * batch if any marker is missing, since a partial response cannot be
 * attributed to items reliably.
 */

use crate::errors::ProviderError;

/// Terminator marker appended after the last entry
pub const END_MARKER: &str = "<<END>>";

/// Marker placed before the entry at the given index
pub fn entry_marker(index: usize) -> String {
    format!("<<ENTRY_{}>>", index)
}

/// Build the system prompt for one batch
///
/// The protected-term rule is a prompt-level contract only; output is not
/// verified against it.
pub fn build_system_prompt(target_language_name: &str, protected_terms: &[String]) -> String {
    let mut prompt = format!(
        "You are a professional translator for mobile app localization. \
         Translate each entry below to {}.\n\
         RULES:\n\
         1. Keep every <<ENTRY_n>> marker and the final <<END>> marker exactly as given.\n\
         2. Translate only the text between markers; output nothing else.\n\
         3. Maintain the tone and style appropriate for an app store listing.\n\
         4. Preserve placeholders such as %@, %d and {{variables}} unchanged.",
        target_language_name
    );
    if !protected_terms.is_empty() {
        prompt.push_str(&format!(
            "\n5. Leave these terms unchanged, verbatim: {}.",
            protected_terms.join(", ")
        ));
    }
    prompt
}

/// Combine batch texts into one marker-delimited prompt body
pub fn encode_batch(texts: &[String]) -> String {
    let mut combined = String::new();
    for (index, text) in texts.iter().enumerate() {
        combined.push_str(&entry_marker(index));
        combined.push('\n');
        combined.push_str(text);
        combined.push('\n');
    }
    combined.push_str(END_MARKER);
    combined
}

/// Split a marker-delimited response back into one text per entry
pub fn decode_batch(response: &str, count: usize) -> Result<Vec<String>, ProviderError> {
    let mut texts = Vec::with_capacity(count);
    let mut cursor = 0;

    for index in 0..count {
        let start_marker = entry_marker(index);
        let end_marker = if index == count - 1 {
            END_MARKER.to_string()
        } else {
            entry_marker(index + 1)
        };

        let start = response[cursor..]
            .find(&start_marker)
            .map(|pos| cursor + pos + start_marker.len())
            .ok_or_else(|| {
                ProviderError::ParseError(format!(
                    "Could not find start marker for entry {}",
                    index
                ))
            })?;

        let end = response[start..]
            .find(&end_marker)
            .map(|pos| start + pos)
            .ok_or_else(|| {
                ProviderError::ParseError(format!("Could not find end marker for entry {}", index))
            })?;

        texts.push(response[start..end].trim().to_string());
        cursor = end;
    }

    Ok(texts)
}
