use anyhow::Result;
use atlas_core::EdgeHighlight;
use std::ffi::OsString;

use crate::util::config::ViewerConfig;

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub api_base: Option<String>,
    pub node: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub highlight: Option<EdgeHighlight>,
}

impl Overrides {
    pub fn apply(self, cfg: &mut ViewerConfig) {
        if let Some(v) = self.api_base {
            cfg.api_base = v;
        }
        if let Some(v) = self.node {
            cfg.default_node = v;
        }
        if let Some(v) = self.from {
            cfg.path_from = v;
        }
        if let Some(v) = self.to {
            cfg.path_to = v;
        }
        if let Some(v) = self.highlight {
            cfg.edge_highlight = v;
        }
    }
}

pub fn parse_args() -> Result<Overrides> {
    parse_args_from(std::env::args_os().skip(1))
}

fn parse_args_from<I>(args: I) -> Result<Overrides>
where
    I: IntoIterator<Item = OsString>,
{
    let mut out = Overrides::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let flag = arg.to_string_lossy().into_owned();
        let slot = match flag.as_str() {
            "--api-base" => &mut out.api_base,
            "--node" => &mut out.node,
            "--from" => &mut out.from,
            "--to" => &mut out.to,
            "--highlight" => {
                let Some(value) = args.next() else {
                    anyhow::bail!("--highlight expects traversed|membership");
                };
                let value = value.to_string_lossy();
                let Some(mode) = EdgeHighlight::parse(&value) else {
                    anyhow::bail!("invalid highlight mode: {value} (expected traversed|membership)");
                };
                out.highlight = Some(mode);
                continue;
            }
            _ => anyhow::bail!("unknown argument: {:?}", arg),
        };
        let Some(value) = args.next() else {
            anyhow::bail!("{flag} expects a value");
        };
        let value = value.to_string_lossy().trim().to_string();
        if value.is_empty() {
            anyhow::bail!("{flag} expects a non-empty value");
        }
        *slot = Some(value);
    }

    Ok(out)
}
