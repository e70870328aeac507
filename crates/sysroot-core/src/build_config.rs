//! Declared cross-compile target from build configuration.
//!
//! The target token can come from the command line, the config file, or a
//! `GYP_DEFINES` string (`"target_arch=arm component=shared_library"`).
//! Reading the environment is the caller's job; these functions only parse.

/// Environment variable holding space-separated `key=value` build defines.
pub const GYP_DEFINES_VAR: &str = "GYP_DEFINES";

/// Value of `target_arch` in a `GYP_DEFINES` string; the last definition wins.
pub fn target_arch_from_gyp_defines(defines: &str) -> Option<String> {
    split_defines(defines)
        .into_iter()
        .filter_map(|word| {
            word.split_once('=')
                .filter(|(key, _)| *key == "target_arch")
                .map(|(_, value)| value.to_string())
        })
        .last()
}

/// First declared target token: command line, then config file, then `GYP_DEFINES`.
pub fn declared_target_arch(
    cli: Option<&str>,
    config: Option<&str>,
    gyp_defines: Option<&str>,
) -> Option<String> {
    cli.or(config)
        .map(str::to_string)
        .or_else(|| gyp_defines.and_then(target_arch_from_gyp_defines))
}

/// Shell-style word split honouring single and double quotes.
fn split_defines(s: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut cur = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    for c in s.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => cur.push(c),
            None if c == '\'' || c == '"' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut cur));
                    in_word = false;
                }
            }
            None => {
                cur.push(c);
                in_word = true;
            }
        }
    }
    if in_word {
        words.push(cur);
    }
    words
}
