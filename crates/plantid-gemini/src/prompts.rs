//! Instruction text sent alongside the image

/// Identification instruction. The reply is expected as a name line
/// followed by description lines, which `parse_reply` relies on.
pub const IDENTIFY_PROMPT: &str =
    "Identify this plant. Provide its name and a brief description in two separate lines.";
