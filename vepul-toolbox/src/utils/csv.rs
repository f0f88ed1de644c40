use serde::Serialize;
use std::io::Write;
use std::path::Path;

pub fn dump_data_to_csv<T: Serialize>(data: &[T], path: &Path) -> Result<(), csv::Error> {
    write_data_as_csv(data, std::fs::File::create(path)?)
}

pub fn write_data_as_csv<T: Serialize, W: Write>(data: &[T], writer: W) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);
    for entry in data {
        writer.serialize(entry)?;
    }
    writer.flush()?;
    Ok(())
}
