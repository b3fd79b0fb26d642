//! Test fixtures and constants.

/// A valid 64-character hex key.
pub const TEST_KEY: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";

/// A second valid key, distinct from [`TEST_KEY`].
pub const OTHER_KEY: &str = "ffeeddccbbaa99887766554433221100ffeeddccbbaa99887766554433221100";

/// Syntactically valid envelope that will not authenticate under any key.
pub const PLACEHOLDER_ENVELOPE: &str =
    "000000000000000000000000:00000000000000000000000000000000:00\n";

/// Clean .env content.
pub const SAMPLE_ENV: &str = "DATABASE_URL=postgres://localhost/mydb\nAPI_KEY=sk-test-12345\n";

/// Sample .env with comments and quoting.
pub const SAMPLE_ENV_COMPLEX: &str = r#"# This is a comment
SIMPLE=value
QUOTED="quoted value"
SINGLE_QUOTED='single quoted'
export EXPORTED=yes

# Another comment
SPECIAL_CHARS=p@ssw0rd!#$%
"#;

/// Content whose only error is a missing final newline.
pub const MISSING_NEWLINE_ENV: &str = "FOO=bar";

/// Content with an error that cannot be fixed automatically.
pub const BROKEN_ENV: &str = "FOO=bar\nNOT AN ASSIGNMENT\n";
