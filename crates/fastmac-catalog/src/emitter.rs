//! Script emission
//!
//! Renders a resolved tool list into one shell script through an embedded
//! tera template. Everything that reaches the script as data (names,
//! descriptions, messages, package names) goes through the `shell_quote`
//! filter; check, install and hook commands are emitted verbatim. Checks sit
//! in a brace group whose status picks the branch. Every other step runs in
//! its own `set -e` subshell, so a failing line anywhere in a multi-line
//! command aborts the script with that step's message.

use fastmac_core::error::{Error, Result};
use fastmac_core::shell::shell_quote;
use fastmac_core::types::{InstallMethod, PackageManagerConfig, ScriptConfig, Tool};
use serde::Serialize;
use std::collections::HashMap;
use tera::{Tera, Value};
use tracing::debug;

const INSTALL_TEMPLATE: &str = "install.sh";

/// Caller-supplied values that vary between runs
#[derive(Debug, Clone, Default)]
pub struct EmitOptions {
    /// Date shown in the header, omitted when `None`
    pub generated_on: Option<String>,
    /// Estimated minutes shown in the header, omitted when `None`
    pub estimate_minutes: Option<u32>,
}

#[derive(Debug, Serialize)]
struct StepContext {
    command: String,
    failure: String,
}

#[derive(Debug, Serialize)]
struct ToolContext {
    id: String,
    name: String,
    description: String,
    check: String,
    install: String,
    pre_install: Vec<StepContext>,
    post_install: Vec<StepContext>,
    already_installed: String,
    installing: String,
    install_failed: String,
    installed: String,
}

#[derive(Debug, Serialize)]
struct ManagerContext {
    command: String,
    bootstrap: Vec<String>,
    refresh: String,
    installing: String,
    already_installed: String,
    install_failed: String,
    refreshing: String,
    refresh_failed: String,
}

#[derive(Debug, Serialize)]
struct MessageContext {
    wrong_os: String,
    starting: String,
    installing_tools: String,
    complete: String,
    restart_hint: String,
}

/// Renders resolved tools into an install script
pub struct ScriptEmitter {
    tera: Tera,
    script: ScriptConfig,
    manager: PackageManagerConfig,
}

impl std::fmt::Debug for ScriptEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptEmitter")
            .field("script", &self.script)
            .field("manager", &self.manager)
            .finish_non_exhaustive()
    }
}

impl ScriptEmitter {
    /// Create an emitter for the given script and package-manager settings
    pub fn new(script: &ScriptConfig, manager: &PackageManagerConfig) -> Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);

        tera.register_filter("shell_quote", shell_quote_filter);
        tera.register_filter("single_line", single_line_filter);

        tera.add_raw_template(INSTALL_TEMPLATE, include_str!("templates/install.sh.tera"))
            .map_err(|e| Error::Template(format!("Failed to add template {}: {}", INSTALL_TEMPLATE, e)))?;

        Ok(Self {
            tera,
            script: script.clone(),
            manager: manager.clone(),
        })
    }

    /// Render the full script for tools already in install order
    ///
    /// `selected` is echoed into the header only. Nothing is returned unless
    /// every tool renders.
    pub fn emit<S: AsRef<str>>(
        &self,
        order: &[&Tool],
        selected: &[S],
        options: &EmitOptions,
    ) -> Result<String> {
        let tools = order
            .iter()
            .map(|tool| self.tool_context(tool))
            .collect::<Result<Vec<_>>>()?;

        let mut context = tera::Context::new();
        context.insert("shell", &self.script.shell);
        context.insert("title", &self.script.title);
        context.insert("generated_on", &options.generated_on);
        context.insert("estimate_minutes", &options.estimate_minutes);
        context.insert("required_os", &self.script.required_os);
        context.insert(
            "selected",
            &selected.iter().map(|s| s.as_ref()).collect::<Vec<_>>(),
        );
        context.insert(
            "order",
            &order.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
        );
        context.insert("manager", &self.manager_context());
        context.insert("messages", &self.messages());
        context.insert("tools", &tools);

        let script = self
            .tera
            .render(INSTALL_TEMPLATE, &context)
            .map_err(|e| Error::Template(render_error_chain(&e)))?;

        debug!("Rendered script for {} tool(s), {} bytes", tools.len(), script.len());
        Ok(script)
    }

    /// The install line for a tool, before guarding
    pub fn install_line(&self, tool: &Tool) -> Result<String> {
        let line = match &tool.install {
            InstallMethod::Package { package, cask } => {
                if package.trim().is_empty() {
                    return Err(Error::render_failure(&tool.id, "package reference is empty"));
                }
                let verb = if *cask {
                    &self.manager.cask_verb
                } else {
                    &self.manager.install_verb
                };
                format!("{} {} {}", self.manager.command, verb, shell_quote(package))
            }
            InstallMethod::Custom { command } => {
                if command.trim().is_empty() {
                    return Err(Error::render_failure(&tool.id, "install command is empty"));
                }
                command.clone()
            }
        };
        Ok(line)
    }

    fn tool_context(&self, tool: &Tool) -> Result<ToolContext> {
        if tool.check_command.trim().is_empty() {
            return Err(Error::render_failure(&tool.id, "check command is empty"));
        }

        let name = tool.name.as_str();
        let steps = |commands: &[String], phase: &str| -> Vec<StepContext> {
            commands
                .iter()
                .enumerate()
                .map(|(i, command)| StepContext {
                    command: command.clone(),
                    failure: format!("{} step {} failed for {}", phase, i + 1, name),
                })
                .collect()
        };

        Ok(ToolContext {
            id: tool.id.clone(),
            name: name.to_string(),
            description: tool.description.clone(),
            check: tool.check_command.clone(),
            install: self.install_line(tool)?,
            pre_install: steps(&tool.pre_install, "Pre-install"),
            post_install: steps(&tool.post_install, "Post-install"),
            already_installed: format!("✅ {} already installed", name),
            installing: format!("📥 Installing {}...", name),
            install_failed: format!("Failed to install {}", name),
            installed: format!("✅ {} installed", name),
        })
    }

    fn manager_context(&self) -> ManagerContext {
        let name = &self.manager.name;
        ManagerContext {
            command: self.manager.command.clone(),
            bootstrap: self
                .manager
                .bootstrap
                .iter()
                .filter(|s| !s.trim().is_empty())
                .cloned()
                .collect(),
            refresh: self.manager.refresh.trim().to_string(),
            installing: format!("📦 Installing {}...", name),
            already_installed: format!("✅ {} already installed", name),
            install_failed: format!("Failed to install {}", name),
            refreshing: format!("🔄 Updating {}...", name),
            refresh_failed: format!("Failed to update {}", name),
        }
    }

    fn messages(&self) -> MessageContext {
        MessageContext {
            wrong_os: format!("This script requires {}", self.script.os_label),
            starting: "🚀 Starting FastMac setup...".to_string(),
            installing_tools: "📥 Installing selected tools...".to_string(),
            complete: "🎉 Setup complete! Your development environment is ready.".to_string(),
            restart_hint: "💡 Don't forget to restart your terminal or run 'source ~/.zshrc'"
                .to_string(),
        }
    }
}

/// Tera wraps the useful message in its source chain
fn render_error_chain(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Quote a value as a single shell word
fn shell_quote_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    };
    Ok(Value::String(shell_quote(&text)))
}

/// Collapse line breaks so a value cannot escape a comment line
fn single_line_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let text = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("Expected string"))?;
    Ok(Value::String(
        text.split(['\r', '\n'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
    ))
}
