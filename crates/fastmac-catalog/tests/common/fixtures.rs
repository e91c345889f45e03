//! Catalog fixtures shared across integration tests

#![allow(dead_code)]

use super::builders::{CatalogBuilder, ToolBuilder};
use fastmac_catalog::Catalog;

/// git <- gh <- dotfiles, the canonical chain
pub fn dev_catalog() -> Catalog {
    CatalogBuilder::new()
        .category("vcs", "Version Control")
        .category("shell", "Shell")
        .tool(ToolBuilder::package("git").name("Git").category("vcs"))
        .tool(
            ToolBuilder::package("gh")
                .name("GitHub CLI")
                .category("vcs")
                .requires(&["git"]),
        )
        .tool(
            ToolBuilder::custom("dotfiles", "gh repo clone me/dotfiles \"$HOME/.dotfiles\"")
                .name("Dotfiles")
                .category("shell")
                .check("test -d \"$HOME/.dotfiles\"")
                .requires(&["gh"]),
        )
        .build()
}

/// a requires b, b requires a
pub fn cyclic_catalog() -> Catalog {
    CatalogBuilder::new()
        .tool(ToolBuilder::package("a").requires(&["b"]))
        .tool(ToolBuilder::package("b").requires(&["a"]))
        .build()
}

/// A catalog document in its on-disk YAML form
pub const SAMPLE_CATALOG_YAML: &str = r#"
version: "1.0"
categories:
  - id: vcs
    name: Version Control
  - id: apps
    name: Applications
tools:
  - id: git
    name: Git
    description: Distributed version control
    category: vcs
    type: standard
    brew_package: git
  - id: gh
    name: GitHub CLI
    category: vcs
    brew_package: gh
    check_command: ""
    requires: [git]
  - id: iterm2
    name: iTerm2
    category: apps
    brew_package: iterm2
    cask: true
    check_command: test -d /Applications/iTerm.app
  - id: oh-my-zsh
    name: Oh My Zsh
    type: custom
    brew_package: ignored
    install_command: sh -c "$(curl -fsSL https://raw.githubusercontent.com/ohmyzsh/ohmyzsh/master/tools/install.sh)" "" --unattended
    check_command: test -d "$HOME/.oh-my-zsh"
    post_install:
      - echo 'ZSH_THEME="robbyrussell"' >> "$HOME/.zshrc"
"#;
