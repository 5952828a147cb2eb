// src/constants.rs

/// The name of the generated cache file inside a build tree.
pub const BUILD_CACHE_FILENAME: &str = "CMakeCache.txt";

/// The name of the optional per-project configuration file.
pub const USER_CONFIG_FILENAME: &str = ".expectconfig";

/// Build-cache key holding the tool home directory (where `expect.py` lives).
pub const TOOL_HOME_KEY: &str = "CMAKE_HOME_DIRECTORY:INTERNAL";

/// Build-cache key holding the interpreter used to run the expect script.
pub const INTERPRETER_KEY: &str = "PYTHON_COMMAND:STRING";

/// Build-cache key holding the configured build type, used as the fallback
/// configuration name for the output-directory lookup.
pub const BUILD_TYPE_KEY: &str = "CMAKE_BUILD_TYPE:STRING";

/// Interpreter used when the build cache does not name one.
pub const DEFAULT_INTERPRETER: &str = "python";

/// The expect script, resolved relative to the tool home.
pub const EXPECT_SCRIPT_FILENAME: &str = "expect.py";

/// Section consulted in the user config when none is given.
pub const DEFAULT_CONFIG_SECTION: &str = "DEFAULT";

/// Directory under the build tree used for temporary regression files
/// when the user config does not name one.
pub const TEMP_DIR_NAME: &str = "regtest";

/// Project files probed (relative to the build directory, in order) for a
/// configuration-dependent output directory.
pub const OUTPUT_PROJECT_FILES: &[&str] = &["qac_com/qac.vcxproj", "qacpp_com/qacpp.vcxproj"];

/// How deep the downward marker search will descend before giving up.
pub const MARKER_SEARCH_MAX_DEPTH: usize = 6;
