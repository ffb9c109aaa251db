/// How a script is handed to the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Body of an anonymous function, invoked synchronously.
    Direct,
    /// Dynamically imported ES module, settled asynchronously.
    Module,
}

const MODULE_MARKERS: [&str; 2] = ["import", "from"];

/// Module mode when `import` or `from` is followed by whitespace anywhere in
/// the text. This is a marker scan, not a parse: the words match inside
/// comments and strings too.
pub fn classify(script: &str) -> ExecutionMode {
    let marked = MODULE_MARKERS.iter().any(|marker| {
        script.match_indices(marker).any(|(at, _)| {
            script[at + marker.len()..]
                .chars()
                .next()
                .is_some_and(char::is_whitespace)
        })
    });
    if marked {
        ExecutionMode::Module
    } else {
        ExecutionMode::Direct
    }
}
