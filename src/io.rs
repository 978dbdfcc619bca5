pub mod hmmoc;
pub mod json;

use flate2::bufread::GzDecoder;
use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;

///
/// write string into a file
///
pub fn write_string<P: AsRef<std::path::Path>>(filename: P, string: &str) -> std::io::Result<()> {
    let mut file = File::create(filename)?;
    file.write_all(string.as_bytes())?;
    Ok(())
}

///
/// open a file for buffered reading, decompressing it if the extension is `.gz`
///
pub fn open_reader<P: AsRef<std::path::Path>>(path: P) -> std::io::Result<Box<dyn BufRead>> {
    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);

    if path.as_ref().extension().is_some_and(|ext| ext == "gz") {
        let decoder = GzDecoder::new(reader);
        Ok(Box::new(BufReader::new(decoder)))
    } else {
        Ok(Box::new(reader))
    }
}
