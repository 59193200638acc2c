pub const DEFAULT_SEPARATOR: char = ';';
pub const HEADER_MARKER: char = '#';
pub const ANONYMOUS_COLUMN_PREFIX: &str = "Parameter ";
pub const RULE_CONJUNCTION: &str = " & ";
pub const RULE_IMPLICATION: &str = " => ";
pub const RULE_EQUALS: &str = " = ";
