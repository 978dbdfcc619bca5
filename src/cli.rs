//!
//! Conversion pipeline of the command line tool
//!
//! hmm file -> Plan7Model -> FiniteStateModel -> HMMoC xml / json / dot
//!
use crate::error::Result;
use crate::fsm::FiniteStateModel;
use crate::io::hmmoc::{write_hmmoc, RealType};
use crate::io::json::write_json;
use crate::params::ConvertParams;
use crate::plan7::Plan7Model;
use log::info;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

///
/// Output document type
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// HMMoC xml
    Hmmoc,
    Json,
    /// graphviz
    Dot,
}

impl FromStr for OutputFormat {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "hmmoc" | "xml" => Ok(OutputFormat::Hmmoc),
            "json" => Ok(OutputFormat::Json),
            "dot" => Ok(OutputFormat::Dot),
            _ => Err(format!("unknown format '{}' (hmmoc, json or dot)", s)),
        }
    }
}

///
/// file name of `path` up to its first `.`
///
/// `data/globin.hmm.gz` -> `globin`
///
pub fn basename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .and_then(|name| name.split('.').next().map(|s| s.to_owned()))
        .unwrap_or_default()
}

///
/// Parse the hmm file and build its finite-state model
///
pub fn convert(input: &Path, params: &ConvertParams) -> Result<FiniteStateModel> {
    let plan7 = Plan7Model::from_hmm_file(input, params)?;
    let fsm = FiniteStateModel::from_plan7(&plan7, params);
    info!("built {}", fsm);
    Ok(fsm)
}

///
/// Write `fsm` in the format
///
pub fn write_model<W: Write>(
    mut writer: W,
    fsm: &FiniteStateModel,
    format: OutputFormat,
    basename: &str,
    realtype: RealType,
) -> std::io::Result<()> {
    match format {
        OutputFormat::Hmmoc => write_hmmoc(&mut writer, fsm, basename, realtype)?,
        OutputFormat::Json => write_json(&mut writer, fsm)?,
        OutputFormat::Dot => write!(writer, "{}", fsm.to_dot())?,
    }
    writer.flush()
}

///
/// Convert `input` and write the document into `output` (stdout if `None`)
///
pub fn run(
    input: &Path,
    output: Option<&Path>,
    format: OutputFormat,
    realtype: RealType,
    params: &ConvertParams,
) -> Result<()> {
    let fsm = convert(input, params)?;
    let name = basename(input);
    match output {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            write_model(std::io::BufWriter::new(file), &fsm, format, &name, realtype)?;
            info!("wrote {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            write_model(stdout.lock(), &fsm, format, &name, realtype)?;
        }
    }
    Ok(())
}
