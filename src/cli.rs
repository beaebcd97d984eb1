use clap::Parser;

/// Print the HTML of a Codeforces contest page
///
/// Every argument is data: no token is read as a flag, and anything after
/// the contest id is ignored.
#[derive(Debug, Parser)]
#[command(about, long_about = None, disable_help_flag = true, disable_version_flag = true)]
pub struct Args {
    /// Contest id, inserted verbatim into the page URL
    #[arg(
        value_name = "CONTEST_ID",
        required = true,
        num_args = 1..,
        allow_hyphen_values = true,
        trailing_var_arg = true
    )]
    tokens: Vec<String>,
}

impl Args {
    pub fn contest_id(&self) -> &str {
        self.tokens.first().map(String::as_str).unwrap_or_default()
    }
}
