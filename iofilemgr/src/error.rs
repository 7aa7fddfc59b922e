//! 内核返回值的解析
//!
//! 内核接口返回有符号整数，负数即错误码。错误码按最高的16位分类：
//! - `0x8001xxxx`：errno类错误，低16位是errno（newlib的编号）
//! - `0x80020004`：`SCE_KERNEL_ERROR_UNSUP`，内核未实现该调用
//! - 其他负数：原样保留

use crate::consts::{SCE_ERROR_ERRNO_BASE, SCE_KERNEL_ERROR_UNSUP};
use crate::types::{SceOff, SceSSize};
use core::fmt::{self, Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Errno(pub u16);

impl Errno {
    pub const EPERM: Errno = Errno(1);
    pub const ENOENT: Errno = Errno(2);
    pub const ESRCH: Errno = Errno(3);
    pub const EINTR: Errno = Errno(4);
    pub const EIO: Errno = Errno(5);
    pub const ENXIO: Errno = Errno(6);
    pub const E2BIG: Errno = Errno(7);
    pub const ENOEXEC: Errno = Errno(8);
    pub const EBADF: Errno = Errno(9);
    pub const ECHILD: Errno = Errno(10);
    pub const EAGAIN: Errno = Errno(11);
    pub const ENOMEM: Errno = Errno(12);
    pub const EACCES: Errno = Errno(13);
    pub const EFAULT: Errno = Errno(14);
    pub const EBUSY: Errno = Errno(16);
    pub const EEXIST: Errno = Errno(17);
    pub const EXDEV: Errno = Errno(18);
    pub const ENODEV: Errno = Errno(19);
    pub const ENOTDIR: Errno = Errno(20);
    pub const EISDIR: Errno = Errno(21);
    pub const EINVAL: Errno = Errno(22);
    pub const ENFILE: Errno = Errno(23);
    pub const EMFILE: Errno = Errno(24);
    pub const ENOTTY: Errno = Errno(25);
    pub const EFBIG: Errno = Errno(27);
    pub const ENOSPC: Errno = Errno(28);
    pub const ESPIPE: Errno = Errno(29);
    pub const EROFS: Errno = Errno(30);
    pub const EMLINK: Errno = Errno(31);
    pub const EPIPE: Errno = Errno(32);
    pub const ERANGE: Errno = Errno(34);
    pub const ENOSYS: Errno = Errno(88);
    pub const ENOTEMPTY: Errno = Errno(90);
    pub const ENAMETOOLONG: Errno = Errno(91);
    pub const ENOTSUP: Errno = Errno(134);

    // (errno, 名字, 描述)
    const TABLE: &'static [(u16, &'static str, &'static str)] = &[
        (1, "EPERM", "operation not permitted"),
        (2, "ENOENT", "no such file or directory"),
        (3, "ESRCH", "no such process"),
        (4, "EINTR", "interrupted call"),
        (5, "EIO", "i/o error"),
        (6, "ENXIO", "no such device or address"),
        (7, "E2BIG", "argument list too long"),
        (8, "ENOEXEC", "exec format error"),
        (9, "EBADF", "bad file descriptor"),
        (10, "ECHILD", "no child processes"),
        (11, "EAGAIN", "resource temporarily unavailable"),
        (12, "ENOMEM", "out of memory"),
        (13, "EACCES", "permission denied"),
        (14, "EFAULT", "bad address"),
        (16, "EBUSY", "device or resource busy"),
        (17, "EEXIST", "file exists"),
        (18, "EXDEV", "cross-device link"),
        (19, "ENODEV", "no such device"),
        (20, "ENOTDIR", "not a directory"),
        (21, "EISDIR", "is a directory"),
        (22, "EINVAL", "invalid argument"),
        (23, "ENFILE", "too many open files in system"),
        (24, "EMFILE", "too many open files"),
        (25, "ENOTTY", "inappropriate ioctl for device"),
        (27, "EFBIG", "file too large"),
        (28, "ENOSPC", "no space left on device"),
        (29, "ESPIPE", "illegal seek"),
        (30, "EROFS", "read-only file system"),
        (31, "EMLINK", "too many links"),
        (32, "EPIPE", "broken pipe"),
        (34, "ERANGE", "result out of range"),
        (88, "ENOSYS", "function not implemented"),
        (90, "ENOTEMPTY", "directory not empty"),
        (91, "ENAMETOOLONG", "file name too long"),
        (134, "ENOTSUP", "not supported"),
    ];

    fn lookup(&self) -> Option<&'static (u16, &'static str, &'static str)> {
        Self::TABLE.iter().find(|entry| entry.0 == self.0)
    }

    pub fn name(&self) -> Option<&'static str> {
        self.lookup().map(|entry| entry.1)
    }

    pub fn description(&self) -> Option<&'static str> {
        self.lookup().map(|entry| entry.2)
    }

    // 内核对应的错误码
    pub fn code(&self) -> u32 {
        SCE_ERROR_ERRNO_BASE | self.0 as u32
    }
}

impl Display for Errno {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.lookup() {
            Some((_, name, desc)) => write!(f, "{}: {}", name, desc),
            None => write!(f, "errno {}", self.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    Errno(Errno),
    // SCE_KERNEL_ERROR_UNSUP
    Unsupported,
    Kernel(u32),
}

pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    // 由内核返回的负数构造。调用者需保证code < 0
    pub fn from_code(code: i32) -> Self {
        let code = code as u32;
        if code == SCE_KERNEL_ERROR_UNSUP {
            Error::Unsupported
        } else if code & 0xFFFF_0000 == SCE_ERROR_ERRNO_BASE {
            Error::Errno(Errno((code & 0xFFFF) as u16))
        } else {
            Error::Kernel(code)
        }
    }

    pub fn code(&self) -> u32 {
        match self {
            Error::Errno(errno) => errno.code(),
            Error::Unsupported => SCE_KERNEL_ERROR_UNSUP,
            Error::Kernel(code) => *code,
        }
    }

    pub fn errno(&self) -> Option<Errno> {
        match self {
            Error::Errno(errno) => Some(*errno),
            _ => None,
        }
    }
}

impl From<Errno> for Error {
    fn from(errno: Errno) -> Self {
        Error::Errno(errno)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::Errno(errno) => write!(f, "{} ({:#010x})", errno, self.code()),
            Error::Unsupported => write!(f, "unsupported ({:#010x})", self.code()),
            Error::Kernel(code) => write!(f, "kernel error {:#010x}", code),
        }
    }
}

// 检查int类型的返回值
pub(crate) fn check(ret: i32) -> Result<i32> {
    if ret < 0 {
        Err(Error::from_code(ret))
    } else {
        Ok(ret)
    }
}

// 检查SceSSize类型的返回值，成功时是字节数
pub(crate) fn check_size(ret: SceSSize) -> Result<usize> {
    check(ret).map(|n| n as usize)
}

// 检查SceOff类型的返回值。出错时错误码被符号扩展到64位，
// 不是符号扩展的32位错误码的负值视为EIO
pub(crate) fn check_off(ret: SceOff) -> Result<u64> {
    if ret >= 0 {
        Ok(ret as u64)
    } else if let Ok(code) = i32::try_from(ret) {
        Err(Error::from_code(code))
    } else {
        Err(Errno::EIO.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_open_filehandle_left() {
        let err = Error::from_code(0x8001_0018u32 as i32);
        assert_eq!(err, Error::Errno(Errno::EMFILE));
        assert_eq!(err.code(), 0x8001_0018);
        assert_eq!(Errno::EMFILE.name(), Some("EMFILE"));
    }

    #[test]
    fn unsupported() {
        let err = Error::from_code(0x8002_0004u32 as i32);
        assert_eq!(err, Error::Unsupported);
        assert_eq!(err.code(), SCE_KERNEL_ERROR_UNSUP);
        assert_eq!(err.errno(), None);
    }

    #[test]
    fn other_kernel_codes_are_kept() {
        let err = Error::from_code(0x8002_0005u32 as i32);
        assert_eq!(err, Error::Kernel(0x8002_0005));
        assert_eq!(Error::from_code(-1), Error::Kernel(0xFFFF_FFFF));
    }

    #[test]
    fn check_results() {
        assert_eq!(check(0), Ok(0));
        assert_eq!(check(7), Ok(7));
        assert_eq!(check_size(512), Ok(512));
        assert_eq!(
            check(Errno::ENOENT.code() as i32),
            Err(Error::Errno(Errno::ENOENT))
        );
    }

    #[test]
    fn seek_error_is_sign_extended() {
        let ret = Errno::ESPIPE.code() as i32 as SceOff;
        assert!(ret < 0);
        assert_eq!(check_off(ret), Err(Error::Errno(Errno::ESPIPE)));
        assert_eq!(check_off(1 << 40), Ok(1 << 40));
    }

    #[test]
    fn seek_result_below_i32_is_eio() {
        // 低32位是0，不能当作错误码
        assert_eq!(check_off(-(1 << 32)), Err(Error::Errno(Errno::EIO)));
        assert_eq!(check_off(SceOff::MIN), Err(Error::Errno(Errno::EIO)));
        assert_eq!(
            check_off(i32::MIN as SceOff),
            Err(Error::Kernel(0x8000_0000))
        );
    }

    #[test]
    fn display() {
        assert_eq!(
            std::format!("{}", Error::Errno(Errno::ENOENT)),
            "ENOENT: no such file or directory (0x80010002)"
        );
        assert_eq!(std::format!("{}", Error::Unsupported), "unsupported (0x80020004)");
        assert_eq!(std::format!("{}", Errno(200)), "errno 200");
    }
}
