/// Splits a finalized message into the physical lines handed to the logger.
///
/// A message without `'\n'` yields itself once. A trailing `'\n'` yields a final
/// empty line. Joining the lines with `'\n'` gives back the input.
pub fn split_lines(message: &str) -> std::str::Split<'_, char> {
    message.split('\n')
}
