//! src/levels.rs
//! Verbose severities one, two and three points below `INFO`.

use logging::{Severity, register_level_name};

/// First verbose level, `INFO - 1`.
pub const VLOG_1: Severity = Severity::INFO.below(1);
/// Second verbose level, `INFO - 2`.
pub const VLOG_2: Severity = Severity::INFO.below(2);
/// Third verbose level, `INFO - 3`.
pub const VLOG_3: Severity = Severity::INFO.below(3);

/// Registers the `VLOG_1`, `VLOG_2` and `VLOG_3` display names.
///
/// Safe to call any number of times; later calls leave the names unchanged.
///
/// # Examples
///
/// ```
/// use vmodule::{VLOG_2, register_vlog_levels};
///
/// register_vlog_levels();
/// register_vlog_levels();
/// assert_eq!(VLOG_2.name(), "VLOG_2");
/// ```
pub fn register_vlog_levels() {
    register_level_name(VLOG_1, "VLOG_1");
    register_level_name(VLOG_2, "VLOG_2");
    register_level_name(VLOG_3, "VLOG_3");
}

#[cfg(test)]
mod tests {
    use super::*;
    use logging::level_for_name;

    #[test]
    fn levels_descend_from_info() {
        assert_eq!(VLOG_1.value(), 19);
        assert_eq!(VLOG_2.value(), 18);
        assert_eq!(VLOG_3.value(), 17);
        assert!(Severity::INFO > VLOG_1 && VLOG_1 > VLOG_2 && VLOG_2 > VLOG_3);
        assert!(VLOG_3 > Severity::DEBUG);
    }

    #[test]
    fn registration_is_repeatable() {
        register_vlog_levels();
        register_vlog_levels();

        assert_eq!(VLOG_1.to_string(), "VLOG_1");
        assert_eq!(VLOG_3.to_string(), "VLOG_3");
        assert_eq!(level_for_name("VLOG_2"), Some(VLOG_2));
    }
}
