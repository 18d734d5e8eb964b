pub const UNKNOWN_INITIALS: &str = "??";

/// Up to two uppercase initials, one per space separated word.
pub fn initials(name: &str) -> String {
    if name.is_empty() {
        return UNKNOWN_INITIALS.to_string();
    }
    name.split(' ')
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

/// CSS class for a status badge; empty when the status has no colour.
pub fn status_class(status: &str) -> &'static str {
    match status.to_lowercase().as_str() {
        "active" => "status-green",
        "inactive" => "status-red",
        "pending" => "status-yellow",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initials_of_names() {
        assert_eq!(initials("John Smith"), "JS");
        assert_eq!(initials("Madonna"), "M");
        assert_eq!(initials(""), "??");
        assert_eq!(initials("mary jane watson"), "MJ");
    }

    #[test]
    fn initials_skip_repeated_spaces() {
        assert_eq!(initials("Ann  Lee"), "AL");
        assert_eq!(initials(" "), "");
    }

    #[test]
    fn status_classes() {
        assert_eq!(status_class("ACTIVE"), "status-green");
        assert_eq!(status_class("Inactive"), "status-red");
        assert_eq!(status_class("Pending"), "status-yellow");
        assert_eq!(status_class(""), "");
        assert_eq!(status_class("archived"), "");
    }
}
