use clap::Parser;
use std::path::{Path, PathBuf};

mod artifact;
mod cli;
mod config;
mod deliver;
mod errors;
mod extract;
mod generate;
mod log;
mod prompt;
mod provider;
mod ux;
mod wire;

use artifact::Tab;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();

    let mut cfg = config::Config::default();
    cfg.root = args.root.clone();

    let mut theme = config::load_theme();
    if args.toggle_theme {
        theme = theme.flip();
        config::save_theme(theme)?;
        ux::notify_success(match theme {
            config::Theme::Light => "theme set to light",
            config::Theme::Dark => "theme set to dark",
        });
    }

    let request = wire::GenerationRequest {
        prompt_text: args.task.clone().unwrap_or_default(),
        framework: args.framework,
    };
    // Validation failures never reach the network.
    if let Err(e) = request.validate() {
        ux::notify_error(&e.to_string());
        return Ok(());
    }

    let prov = provider::make_provider(
        args.provider.clone(),
        args.model.clone(),
        args.timeout_secs,
        cfg.ollama_url.clone(),
        cfg.anthropic_api_base.clone(),
    )?;

    let mut store = artifact::ArtifactStore::new();
    let mut ui = artifact::UiState::default();
    ui.active_tab = match args.tab {
        cli::TabChoice::Code => Tab::Code,
        cli::TabChoice::Preview => Tab::Preview,
    };
    ui.fullscreen_preview = args.fullscreen;

    let pb = ux::spinner("generating component");
    let outcome =
        generate::run_generation(&request, prov.as_ref(), &mut store, &mut ui, &cfg, args.debug)
            .await;
    pb.finish_and_clear();

    let gen = match outcome {
        Ok(g) => g,
        Err(e) => {
            ux::notify_error(&format!("generation failed: {e}"));
            return Ok(());
        }
    };

    if args.debug {
        log::print_planned_paths(Path::new(&cfg.root), gen.request.transaction.id);
    }
    let saved_log = log::save_stage(
        "generate",
        &gen.request,
        &gen.reply,
        gen.request.transaction.id,
        &cfg,
        args.save_request,
        args.save_response,
    )?;
    if args.debug {
        log::print_saved_paths("generate", &saved_log);
        log::print_json_debug("generate", &gen.request, &gen.reply)?;
    }

    // Delivery operations read the store on demand; none of them mutate it.
    let html = store.get().unwrap_or(gen.html.as_str());

    if ui.output_visible && ui.active_tab == Tab::Code {
        ux::print_code(html, theme);
    }

    let mut summary = deliver::DeliverySummary::default();

    if args.copy {
        match deliver::copy_to_clipboard(html) {
            Ok(()) => {
                summary.copied = true;
                ux::notify_success("copied to clipboard");
            }
            Err(e) => ux::notify_error(&e.to_string()),
        }
    }

    if args.save || args.out.is_some() {
        let path = args
            .out
            .clone()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(&cfg.output_file));
        match deliver::save_artifact(html, &path) {
            Ok(bytes) => {
                ux::notify_success(&format!("saved {} ({bytes}B)", path.display()));
                summary.saved = Some((path, bytes));
            }
            Err(e) => ux::notify_error(&e.to_string()),
        }
    }

    if args.preview || args.fullscreen || ui.active_tab == Tab::Preview {
        let dir = Path::new(&cfg.root).join(&cfg.preview_dir);
        match deliver::write_preview_page(html, &dir, ui.fullscreen_preview) {
            Ok(page) => {
                match deliver::open_in_browser(&page) {
                    Ok(()) => ux::notify_success(&format!(
                        "preview opened ({})",
                        if ui.fullscreen_preview { "fullscreen" } else { "embedded" }
                    )),
                    Err(e) => ux::notify_error(&e.to_string()),
                }
                summary.previews.push(page);
            }
            Err(e) => ux::notify_error(&e.to_string()),
        }
    }

    ux::print_summary_dashboard(&summary, &gen.request, html.len(), theme);

    Ok(())
}
