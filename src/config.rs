/// Static settings of the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// Shown in the banner and in front of every error message.
    pub project_name: String,
    /// Shown in the banner.
    pub author: String,
    pub prompt: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            project_name: "MyShell".to_owned(),
            author: env!("CARGO_PKG_AUTHORS").replace(':', ", "),
            prompt: "$ ".to_owned(),
        }
    }
}

impl ShellConfig {
    /// The two lines printed before the first prompt.
    pub fn banner(&self) -> String {
        format!(
            "Welcome to {} by {}\nType \"help\" for more information.\n",
            self.project_name, self.author
        )
    }
}
