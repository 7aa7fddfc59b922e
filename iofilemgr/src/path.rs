//! 路径到C字符串的转换

use crate::consts::SCE_IO_MAX_PATH_LENGTH;
use crate::error::{Errno, Result};
use core::ffi::CStr;
use core::fmt::{self, Debug, Formatter};

// 以'\0'结尾的路径，存放在栈上的定长缓冲区里
pub struct CPath {
    buf: [u8; SCE_IO_MAX_PATH_LENGTH + 1],
    len: usize,
}

impl CPath {
    // 路径不能包含'\0'，长度不能超过SCE_IO_MAX_PATH_LENGTH
    pub fn new(path: &str) -> Result<Self> {
        let bytes = path.as_bytes();
        if bytes.len() > SCE_IO_MAX_PATH_LENGTH {
            return Err(Errno::ENAMETOOLONG.into());
        }
        if bytes.contains(&0) {
            return Err(Errno::EINVAL.into());
        }
        let mut buf = [0u8; SCE_IO_MAX_PATH_LENGTH + 1];
        buf[..bytes.len()].copy_from_slice(bytes);
        Ok(Self {
            buf,
            len: bytes.len(),
        })
    }

    pub fn as_cstr(&self) -> &CStr {
        // new()保证了buf[..len]中没有'\0'，且buf[len]为'\0'
        unsafe { CStr::from_bytes_with_nul_unchecked(&self.buf[..=self.len]) }
    }

    pub fn as_str(&self) -> &str {
        // 来自&str，必然是合法的UTF-8
        unsafe { core::str::from_utf8_unchecked(&self.buf[..self.len]) }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // 设备名，即第一个':'之前的部分。如"ux0:data/a.bin"的设备名是"ux0"
    pub fn device(&self) -> Option<&str> {
        self.as_str().split_once(':').map(|(dev, _)| dev)
    }
}

impl Debug for CPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(self.as_str(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn nul_terminated() {
        let path = CPath::new("ux0:data/a.bin").unwrap();
        assert_eq!(path.as_cstr().to_bytes_with_nul(), b"ux0:data/a.bin\0");
        assert_eq!(path.len(), 14);
        assert_eq!(path.device(), Some("ux0"));
    }

    #[test]
    fn device_name_only() {
        let path = CPath::new("sdstor0:").unwrap();
        assert_eq!(path.device(), Some("sdstor0"));
        assert_eq!(CPath::new("relative/file").unwrap().device(), None);
    }

    #[test]
    fn length_limit() {
        let longest = "a".repeat(SCE_IO_MAX_PATH_LENGTH);
        assert!(CPath::new(&longest).is_ok());
        let too_long = "a".repeat(SCE_IO_MAX_PATH_LENGTH + 1);
        assert_eq!(
            CPath::new(&too_long).unwrap_err(),
            Error::Errno(Errno::ENAMETOOLONG)
        );
    }

    #[test]
    fn interior_nul_rejected() {
        assert_eq!(
            CPath::new("ux0:a\0b").unwrap_err(),
            Error::Errno(Errno::EINVAL)
        );
    }
}
