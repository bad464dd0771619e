use std::path::PathBuf;

/// Settings shared by every action.
#[derive(Clone, Debug)]
pub struct GlobalArgs {
    pub api_url: String,
    pub session_file: PathBuf,
}

impl GlobalArgs {
    #[must_use]
    pub const fn new(api_url: String, session_file: PathBuf) -> Self {
        Self {
            api_url,
            session_file,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_args() {
        let args = GlobalArgs::new(
            "http://localhost:8000".to_string(),
            PathBuf::from("/tmp/session.json"),
        );
        assert_eq!(args.api_url, "http://localhost:8000");
        assert_eq!(args.session_file, PathBuf::from("/tmp/session.json"));
    }
}
