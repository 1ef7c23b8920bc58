use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(ValueEnum, Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[value(alias = "open-ai", alias = "openai")]
    OpenAI,
    #[value(alias = "anthropic")]
    Anthropic,
    #[value(alias = "ollama")]
    Ollama,
}

/// Target stack for the generated component. The identifier is what gets
/// embedded into the prompt; the label is what the user sees.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Framework {
    #[value(name = "html-css")]
    HtmlCss,
    #[value(name = "html-tailwind")]
    HtmlTailwind,
    #[value(name = "html-bootstrap")]
    HtmlBootstrap,
    #[value(name = "html-css-js")]
    HtmlCssJs,
    #[value(name = "html-tailwind-bootstrap")]
    HtmlTailwindBootstrap,
}

impl Framework {
    pub fn id(&self) -> &'static str {
        match self {
            Framework::HtmlCss => "html-css",
            Framework::HtmlTailwind => "html-tailwind",
            Framework::HtmlBootstrap => "html-bootstrap",
            Framework::HtmlCssJs => "html-css-js",
            Framework::HtmlTailwindBootstrap => "html-tailwind-bootstrap",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Framework::HtmlCss => "HTML + CSS",
            Framework::HtmlTailwind => "HTML + Tailwind",
            Framework::HtmlBootstrap => "HTML + Bootstrap",
            Framework::HtmlCssJs => "HTML + CSS + JS",
            Framework::HtmlTailwindBootstrap => "HTML + Tailwind + Bootstrap",
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabChoice {
    Code,
    Preview,
}

#[derive(Parser, Debug)]
#[command(name = "genui", version, about = "AI component generator: describe a UI component and get one self-contained HTML file")]
pub struct Args {
    /// Natural-language description of the component to generate.
    #[arg(long)]
    pub task: Option<String>,

    #[arg(long, value_enum, default_value_t = Framework::HtmlCss)]
    pub framework: Framework,

    #[arg(long, value_enum, default_value_t = ProviderKind::OpenAI)]
    pub provider: ProviderKind,

    #[arg(long, default_value = "gpt-4.1-mini")]
    pub model: String,

    #[arg(long, default_value = ".")]
    pub root: String,

    /// Which view to show after a successful generation.
    #[arg(long, value_enum, default_value_t = TabChoice::Code)]
    pub tab: TabChoice,

    /// Copy the generated artifact to the system clipboard.
    #[arg(long, default_value_t = false)]
    pub copy: bool,

    /// Save the generated artifact to disk (GenUI-Code.html unless --out is given).
    #[arg(long, default_value_t = false)]
    pub save: bool,

    /// Override the save path; implies --save.
    #[arg(long)]
    pub out: Option<String>,

    /// Open the sandboxed preview in the default browser.
    #[arg(long, default_value_t = false)]
    pub preview: bool,

    /// Render the preview as a full-viewport overlay instead of the embedded frame.
    #[arg(long, default_value_t = false)]
    pub fullscreen: bool,

    /// Flip the persisted light/dark theme before running.
    #[arg(long, default_value_t = false)]
    pub toggle_theme: bool,

    #[arg(long, default_value_t = 2400)]
    pub timeout_secs: u64,

    #[arg(long, default_value_t = true)]
    pub save_request: bool,

    #[arg(long, default_value_t = true)]
    pub save_response: bool,

    #[arg(long, default_value_t = false)]
    pub debug: bool,
}
