//! One runner binding: input area, trigger, output sink.
//!
//! The binding is component-local state, so a fragment swap drops it and the
//! next load starts clean. Running re-clears the sink — output never
//! accumulates across runs. The sink markup comes straight from the runner
//! (`<br>`-separated lines), which is why it renders via `dangerous_inner_html`.

use dioxus::prelude::*;

use crate::content::scan::RunnerBlock;
use crate::runner;
use crate::t;

#[component]
pub fn CodeRunner(block: RunnerBlock) -> Element {
    let mut code = use_signal(|| block.initial_code.clone());
    let mut output = use_signal(String::new);

    let run_label = block
        .run_label
        .clone()
        .unwrap_or_else(|| t!("runner-run"));

    rsx! {
        div { class: "code-runner",
            textarea {
                class: "code-runner__input",
                spellcheck: "false",
                value: "{code}",
                oninput: move |evt| code.set(evt.value()),
            }
            button {
                r#type: "button",
                class: "runButton",
                onclick: move |_| {
                    let source = code.peek().clone();
                    output.set(runner::execute(&source));
                },
                "{run_label}"
            }
            div {
                class: "output",
                id: "{block.output_id}",
                dangerous_inner_html: "{output}",
            }
        }
    }
}
