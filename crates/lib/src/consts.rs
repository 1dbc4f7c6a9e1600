pub const APP_NAME: &str = "confmerge";

/// Build-mapping file looked up in the current directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "confmerge.yml";
