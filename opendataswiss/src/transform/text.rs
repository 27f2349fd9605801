/// Strips markdown heading markers and folds some whitespace so the text can
/// go into an XML text node. Every step is a single left-to-right pass and
/// the order is significant.
pub fn clean_text(text: &str) -> String {
    text.replace("###", "")
        .replace("##", "")
        .replace(" #", " ")
        .replace("# ", " ")
        .replace("__", "")
        .replace("  ", " ")
        .replace('\r', "\n")
        .replace("\n\n", "\n")
}
