use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use crate::{
    error::{Result, ShardError},
    record::Record,
};

/// Reads every record in a shard file, in write order.
///
/// Running out of bytes at a record boundary is the normal end of a
/// shard; running out inside a record means the file was cut short and
/// is reported as [`ShardError::TruncatedShard`].
pub fn read_shard(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let file = File::open(path.as_ref())?;
    let mut reader = BufReader::new(file);

    let mut records = Vec::new();
    loop {
        if reader.fill_buf()?.is_empty() {
            break;
        }
        match bincode::deserialize_from::<_, Record>(&mut reader) {
            Ok(record) => records.push(record),
            Err(err) => match *err {
                bincode::ErrorKind::Io(ref io) if io.kind() == ErrorKind::UnexpectedEof => {
                    return Err(ShardError::TruncatedShard {
                        complete: records.len(),
                    });
                }
                _ => return Err(err.into()),
            },
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{record::Tensor, writer::ShardWriter};
    use std::fs;

    #[test]
    fn truncated_shards_are_reported_not_silently_shortened() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ShardWriter::new(dir.path(), "faces");

        let images = vec![
            Tensor::new(2, 2, 3, vec![1; 12]).unwrap(),
            Tensor::new(2, 2, 3, vec![2; 12]).unwrap(),
        ];
        let grids = vec![
            Tensor::new(4, 4, 1, vec![0; 16]).unwrap(),
            Tensor::new(4, 4, 1, vec![255; 16]).unwrap(),
        ];
        let path = writer.write_shard(&images, &grids, 0).unwrap();

        // Cut the file inside the second record.
        let bytes = fs::read(&path).unwrap();
        fs::write(&path, &bytes[..bytes.len() - 5]).unwrap();

        let err = read_shard(&path).unwrap_err();
        assert!(matches!(err, ShardError::TruncatedShard { complete: 1 }));
    }
}
