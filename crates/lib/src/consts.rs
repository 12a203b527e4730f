pub const APP_NAME: &str = "natload";

/// Directory under the working directory that holds native libraries
pub const LIB_DIR_NAME: &str = "lib";

/// Overrides the library root directory
pub const LIB_DIR_ENV: &str = "NATLOAD_LIB_DIR";

/// Extra path segment for 64-bit x86 native files
pub const X64_DIR: &str = "x64";
