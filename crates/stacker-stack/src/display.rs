//! Display label formatting.

/// Label for a stack of `size` objects.
///
/// Pure function of its inputs; stacks call it on every size mutation.
#[must_use]
pub fn stack_display_text(size: usize, display_name: &str) -> String {
    if size > 1 {
        format!("{size}x {display_name}")
    } else {
        display_name.to_owned()
    }
}
