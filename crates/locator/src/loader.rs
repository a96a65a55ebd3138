use std::{
    env,
    path::{Path, PathBuf},
};

/// Environment variable read by [`ResourceLoader::from_env`].
pub const RESOURCE_PATH_VAR: &str = "SIGCHECK_RESOURCE_PATH";

/// Resolves resource names against an ordered list of search roots.
///
/// The first root containing the resource wins, the way a class path is searched.
#[derive(Debug, Clone, Default)]
pub struct ResourceLoader {
    roots: Vec<PathBuf>,
}
impl ResourceLoader {
    pub fn new<P: Into<PathBuf>>(roots: impl IntoIterator<Item = P>) -> Self {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    /// Search roots taken from [`RESOURCE_PATH_VAR`], in platform path-list syntax.
    pub fn from_env() -> Self {
        Self::from_var(RESOURCE_PATH_VAR)
    }

    pub fn from_var(var: &str) -> Self {
        let roots = env::var_os(var)
            .map(|value| env::split_paths(&value).collect())
            .unwrap_or_default();

        Self { roots }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        let relative = Path::new(name.trim_start_matches('/'));
        self.roots
            .iter()
            .map(|root| root.join(relative))
            .find(|candidate| candidate.is_file())
    }
}

#[cfg(test)]
mod resolve_tests {
    use std::fs;

    use super::*;

    #[test]
    fn it_should_prefer_the_first_root_containing_the_resource() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        fs::write(first.path().join("current.api"), "<api/>").unwrap();
        fs::write(second.path().join("current.api"), "<api/>").unwrap();

        let loader = ResourceLoader::new([first.path(), second.path()]);

        assert_eq!(
            Some(first.path().join("current.api")),
            loader.resolve("current.api")
        );
    }

    #[test]
    fn it_should_ignore_a_leading_slash() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir(root.path().join("api")).unwrap();
        fs::write(root.path().join("api/system.api"), "<api/>").unwrap();

        let loader = ResourceLoader::new([root.path()]);

        assert_eq!(
            Some(root.path().join("api/system.api")),
            loader.resolve("/api/system.api")
        );
    }

    #[test]
    fn it_should_not_resolve_directories() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir(root.path().join("current.api")).unwrap();

        assert_eq!(None, ResourceLoader::new([root.path()]).resolve("current.api"));
    }

    #[test]
    fn it_should_read_roots_from_the_environment() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        let value = env::join_paths([first.path(), second.path()]).unwrap();
        env::set_var("SIGCHECK_TEST_RESOURCE_PATH", &value);

        let loader = ResourceLoader::from_var("SIGCHECK_TEST_RESOURCE_PATH");

        assert_eq!(
            &[first.path().to_path_buf(), second.path().to_path_buf()],
            loader.roots()
        );
    }

    #[test]
    fn it_should_have_no_roots_when_the_variable_is_unset() {
        let loader = ResourceLoader::from_var("SIGCHECK_TEST_UNSET_RESOURCE_PATH");

        assert!(loader.roots().is_empty());
    }
}
