use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

const BUFFER_SIZE: usize = 1024 * 1024; // 1MB buffer

/// 逐位元組比對兩個檔案內容是否完全相同
pub fn files_identical(left: &Path, right: &Path) -> io::Result<bool> {
    let left_file = File::open(left)?;
    let right_file = File::open(right)?;

    if left_file.metadata()?.len() != right_file.metadata()?.len() {
        return Ok(false);
    }

    let mut left_reader = BufReader::with_capacity(BUFFER_SIZE, left_file);
    let mut right_reader = BufReader::with_capacity(BUFFER_SIZE, right_file);
    let mut left_buf = vec![0u8; BUFFER_SIZE];
    let mut right_buf = vec![0u8; BUFFER_SIZE];

    loop {
        let left_read = read_chunk(&mut left_reader, &mut left_buf)?;
        let right_read = read_chunk(&mut right_reader, &mut right_buf)?;

        if left_read != right_read || left_buf[..left_read] != right_buf[..right_read] {
            return Ok(false);
        }
        if left_read == 0 {
            return Ok(true);
        }
    }
}

/// 讀滿緩衝區，只有檔案結尾才會回傳較短的長度
fn read_chunk<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
