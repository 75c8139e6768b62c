use encoding_rs::{DecoderResult, UTF_8};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedLine {
    pub text: String,
    /// Malformed byte sequences that were dropped.
    pub malformed: u64,
}

/// Decode one line of UTF-8, dropping malformed sequences instead of
/// replacing them with U+FFFD. Never fails.
pub fn decode_utf8_ignoring_errors(bytes: &[u8], strip_bom: bool) -> DecodedLine {
    let mut decoder = if strip_bom {
        UTF_8.new_decoder_with_bom_removal()
    } else {
        UTF_8.new_decoder_without_bom_handling()
    };
    let mut text = String::with_capacity(
        decoder
            .max_utf8_buffer_length_without_replacement(bytes.len())
            .unwrap_or(bytes.len()),
    );
    let mut malformed = 0;
    let mut input = bytes;
    loop {
        let (result, read) = decoder.decode_to_string_without_replacement(input, &mut text, true);
        input = &input[read..];
        match result {
            DecoderResult::InputEmpty => break,
            DecoderResult::Malformed(_, _) => malformed += 1,
            DecoderResult::OutputFull => {
                let needed = decoder
                    .max_utf8_buffer_length_without_replacement(input.len())
                    .unwrap_or(input.len() + 4);
                text.reserve(needed);
            }
        }
    }
    DecodedLine { text, malformed }
}
