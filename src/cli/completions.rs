use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    charmbundle completions bash > ~/.bash_completion.d/charmbundle\n\n\
                  Generate zsh completions:\n    charmbundle completions zsh > ~/.zfunc/_charmbundle\n\n\
                  Generate fish completions:\n    charmbundle completions fish > ~/.config/fish/completions/charmbundle.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
