use crate::cli::Framework;
use crate::config::Config;
use crate::wire::{GenerationRequest, Instruction, PromptRequest, Tx};

fn system_prompt() -> &'static str {
r#"You are a senior front-end engineer generating production-quality UI components.

Output contract (MANDATORY):
- Reply with EXACTLY ONE fenced code block (```html ... ```) and nothing else outside it.
- The block must contain ONE complete, self-contained HTML file: doctype, <html>, <head>, <body>.
- Inline everything the component needs (styles, scripts); load third-party frameworks only from public CDNs so the file runs when opened directly.
- No explanations, no commentary, no second code block.

Quality bar:
- Modern, responsive styling; sensible typography and spacing; works on mobile widths.
- Accessible markup: semantic elements, labelled inputs, keyboard-reachable controls.
- Realistic copy relevant to the request (no lorem ipsum)."#
}

/// Per-framework guidance folded into the user prompt so the file stays
/// self-contained.
fn framework_notes(framework: Framework) -> &'static str {
    match framework {
        Framework::HtmlCss => {
            "Use plain HTML and CSS only. Put all styles in a single <style> tag in <head>. No JavaScript."
        }
        Framework::HtmlTailwind => {
            "Style with Tailwind utility classes. Load Tailwind from its CDN <script> in <head>. No custom CSS unless a utility cannot express it."
        }
        Framework::HtmlBootstrap => {
            "Style with Bootstrap 5 classes. Load the Bootstrap CSS and bundle JS from the official CDN. Keep custom CSS minimal."
        }
        Framework::HtmlCssJs => {
            "Use HTML, CSS in a <style> tag, and vanilla JavaScript in a <script> tag at the end of <body>. No frameworks."
        }
        Framework::HtmlTailwindBootstrap => {
            "Combine Tailwind utilities with Bootstrap components. Load both from their CDNs and avoid class-name collisions between the two."
        }
    }
}

fn user_prompt(task: &str, framework: Framework) -> String {
    format!(
"Generate a UI component for this description:

{task}

Target stack: {label} (id: {id})
{notes}

Remember: exactly one fenced ```html code block containing one self-contained HTML file.",
        task = task.trim(),
        label = framework.label(),
        id = framework.id(),
        notes = framework_notes(framework),
    )
}

/// Assemble the wire request for one generation transaction.
pub fn build_request(req: &GenerationRequest, cfg: &Config) -> PromptRequest {
    PromptRequest {
        schema_version: cfg.schema_version.clone(),
        transaction: Tx::new(),
        framework: req.framework.id().into(),
        task: req.prompt_text.trim().into(),
        instruction: Instruction {
            system: system_prompt().into(),
            user: user_prompt(&req.prompt_text, req.framework),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_embeds_task_framework_and_fence_constraint() {
        let req = GenerationRequest {
            prompt_text: "  a newsletter signup card  ".into(),
            framework: Framework::HtmlTailwind,
        };
        let built = build_request(&req, &Config::default());

        assert_eq!(built.task, "a newsletter signup card");
        assert_eq!(built.framework, "html-tailwind");
        assert!(built.instruction.user.contains("a newsletter signup card"));
        assert!(built.instruction.user.contains("HTML + Tailwind"));
        assert!(built.instruction.system.contains("ONE fenced code block")
            || built.instruction.system.contains("EXACTLY ONE fenced code block"));
        assert!(built.instruction.system.contains("self-contained HTML file"));
    }

    #[test]
    fn every_framework_has_distinct_notes() {
        let all = [
            Framework::HtmlCss,
            Framework::HtmlTailwind,
            Framework::HtmlBootstrap,
            Framework::HtmlCssJs,
            Framework::HtmlTailwindBootstrap,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(framework_notes(*a), framework_notes(*b));
            }
        }
    }
}
