//! 常量的类型化封装

use crate::consts::*;
use crate::error::{Errno, Result};
use crate::types::SceOff;
use alloc::vec::Vec;

bitflags! {
    // ksceIoOpen的flag参数
    pub struct OpenFlags: u32 {
        const RDONLY = SCE_O_RDONLY as u32;
        const WRONLY = SCE_O_WRONLY as u32;
        const RDWR = SCE_O_RDWR as u32;
        const NBLOCK = SCE_O_NBLOCK as u32;
        const APPEND = SCE_O_APPEND as u32;
        const CREAT = SCE_O_CREAT as u32;
        const TRUNC = SCE_O_TRUNC as u32;
        const EXCL = SCE_O_EXCL as u32;
        const NOBUF = SCE_O_NOBUF as u32;
        const NOWAIT = SCE_O_NOWAIT as u32;
        const FDEXCL = SCE_O_FDEXCL as u32;
        const PWLOCK = SCE_O_PWLOCK as u32;
        const FGAMEDATA = SCE_O_FGAMEDATA as u32;
    }
}

// 命令行等场景使用的名字，RDWR拆成RDONLY和WRONLY处理
const OPEN_FLAG_NAMES: &[(&str, OpenFlags)] = &[
    ("rdonly", OpenFlags::RDONLY),
    ("wronly", OpenFlags::WRONLY),
    ("nblock", OpenFlags::NBLOCK),
    ("append", OpenFlags::APPEND),
    ("creat", OpenFlags::CREAT),
    ("trunc", OpenFlags::TRUNC),
    ("excl", OpenFlags::EXCL),
    ("nobuf", OpenFlags::NOBUF),
    ("nowait", OpenFlags::NOWAIT),
    ("fdexcl", OpenFlags::FDEXCL),
    ("pwlock", OpenFlags::PWLOCK),
    ("fgamedata", OpenFlags::FGAMEDATA),
];

impl OpenFlags {
    // 头文件中标为Reserved的打开标志
    pub const RESERVED: OpenFlags = OpenFlags {
        bits: SCE_O_NBLOCK as u32 | SCE_O_NOWAIT as u32,
    };

    // 返回(可读, 可写)
    pub fn read_write(&self) -> (bool, bool) {
        (self.contains(Self::RDONLY), self.contains(Self::WRONLY))
    }

    pub fn has_reserved(&self) -> bool {
        self.intersects(Self::RESERVED)
    }

    // 传给内核的值
    pub fn raw(&self) -> i32 {
        self.bits as i32
    }

    // 名字不区分大小写，可带SCE_O_前缀
    pub fn from_name(name: &str) -> Option<OpenFlags> {
        let name = name.trim();
        let name = name
            .strip_prefix("SCE_O_")
            .or_else(|| name.strip_prefix("sce_o_"))
            .unwrap_or(name);
        if name.eq_ignore_ascii_case("rdwr") {
            return Some(Self::RDWR);
        }
        OPEN_FLAG_NAMES
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, flag)| *flag)
    }

    pub fn names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        let rest = if self.contains(Self::RDWR) {
            names.push("rdwr");
            *self - Self::RDWR
        } else {
            *self
        };
        for (name, flag) in OPEN_FLAG_NAMES {
            if rest.contains(*flag) {
                names.push(*name);
            }
        }
        names
    }
}

bitflags! {
    // 访问权限位，0o777即全部权限
    pub struct IoMode: u32 {
        const IXOTH = SCE_S_IXOTH as u32;
        const IWOTH = SCE_S_IWOTH as u32;
        const IROTH = SCE_S_IROTH as u32;
        const IXSYS = SCE_S_IXSYS as u32;
        const IWSYS = SCE_S_IWSYS as u32;
        const IRSYS = SCE_S_IRSYS as u32;
        const IXUSR = SCE_S_IXUSR as u32;
        const IWUSR = SCE_S_IWUSR as u32;
        const IRUSR = SCE_S_IRUSR as u32;
        const IRWXO = SCE_S_IRWXO as u32;
        const IRWXS = SCE_S_IRWXS as u32;
        const IRWXU = SCE_S_IRWXU as u32;
    }
}

impl IoMode {
    pub fn raw(&self) -> i32 {
        self.bits as i32
    }
}

bitflags! {
    // 设备类型。SCE_D_TYPE_NULL（0）对应空集
    pub struct DeviceType: u32 {
        const CHAR = SCE_D_TYPE_CHAR as u32;
        const BLOCK = SCE_D_TYPE_BLOCK as u32;
        const FS = SCE_D_TYPE_FS as u32;
        const ALIAS = SCE_D_TYPE_ALIAS as u32;
        const MOUNTPT = SCE_D_TYPE_MOUNTPT as u32;
    }
}

impl DeviceType {
    pub fn is_null(&self) -> bool {
        self.is_empty()
    }

    // 是否只是别名（设备别名或挂载点）
    pub fn is_alias(&self) -> bool {
        self.intersects(Self::ALIAS | Self::MOUNTPT)
    }
}

// 文件读写位置的移动方式，和std::io::SeekFrom一致
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekFrom {
    Start(u64),
    Current(i64),
    End(i64),
}

impl SeekFrom {
    // 转换成ksceIoLseek的(offset, whence)
    pub fn to_raw(self) -> Result<(SceOff, i32)> {
        match self {
            SeekFrom::Start(pos) => {
                let pos = SceOff::try_from(pos).map_err(|_| Errno::EINVAL)?;
                Ok((pos, SCE_SEEK_SET))
            }
            SeekFrom::Current(off) => Ok((off, SCE_SEEK_CUR)),
            SeekFrom::End(off) => Ok((off, SCE_SEEK_END)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn rdwr_is_read_and_write() {
        assert_eq!(OpenFlags::RDWR, OpenFlags::RDONLY | OpenFlags::WRONLY);
        assert_eq!(OpenFlags::RDWR.read_write(), (true, true));
        assert_eq!(OpenFlags::WRONLY.read_write(), (false, true));
        assert_eq!((OpenFlags::WRONLY | OpenFlags::CREAT).raw(), 0x202);
    }

    #[test]
    fn reserved_bits() {
        assert!((OpenFlags::RDONLY | OpenFlags::NOWAIT).has_reserved());
        assert!(!(OpenFlags::RDWR | OpenFlags::CREAT | OpenFlags::TRUNC).has_reserved());
    }

    #[test]
    fn names_round_trip() {
        let flags = OpenFlags::RDWR | OpenFlags::CREAT | OpenFlags::EXCL;
        assert_eq!(flags.names(), ["rdwr", "creat", "excl"]);
        assert_eq!(OpenFlags::from_name("SCE_O_TRUNC"), Some(OpenFlags::TRUNC));
        assert_eq!(OpenFlags::from_name("RdWr"), Some(OpenFlags::RDWR));
        assert_eq!(OpenFlags::from_name("sync"), None);
    }

    #[test]
    fn full_mode() {
        assert_eq!(IoMode::all().raw(), 0o777);
        assert_eq!((IoMode::IRUSR | IoMode::IWUSR).raw(), 0x180);
    }

    #[test]
    fn device_types() {
        assert!(DeviceType::empty().is_null());
        assert!(DeviceType::MOUNTPT.is_alias());
        assert!(!(DeviceType::BLOCK | DeviceType::FS).is_alias());
        assert_eq!(DeviceType::all().bits(), 0x75);
    }

    #[test]
    fn seek_whence() {
        assert_eq!(SeekFrom::Start(10).to_raw(), Ok((10, SCE_SEEK_SET)));
        assert_eq!(SeekFrom::Current(-4).to_raw(), Ok((-4, SCE_SEEK_CUR)));
        assert_eq!(SeekFrom::End(-10).to_raw(), Ok((-10, SCE_SEEK_END)));
        assert_eq!(
            SeekFrom::Start(u64::MAX).to_raw(),
            Err(Error::Errno(Errno::EINVAL))
        );
    }
}
