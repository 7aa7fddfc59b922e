//! 内核接口使用的基本类型和结构体

use core::ffi::c_void;
use core::mem::size_of;
use core::ptr;

// 内核对象的ID，文件描述符也是一种UID
pub type SceUID = i32;
// 文件偏移量
pub type SceOff = i64;
// 字节数
pub type SceSize = u32;
// 字节数或负的错误码
pub type SceSSize = i32;
// 访问权限位
pub type SceIoMode = i32;

/// 设备信息，由devctl命令`SCE_IO_DEVCTL_GET_DEV_INFO`（0x3001）返回
///
/// ```ignore
/// let info = manager.dev_info("ux0:")?;
/// ```
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceIoDevInfo {
    // 设备的总容量（字节）
    pub max_size: SceOff,
    // 剩余容量（字节）
    pub free_size: SceOff,
    // 簇大小（字节）
    pub cluster_size: SceSize,
    // 保留
    pub unk: *mut c_void,
}

impl Default for SceIoDevInfo {
    fn default() -> Self {
        Self {
            max_size: 0,
            free_size: 0,
            cluster_size: 0,
            unk: ptr::null_mut(),
        }
    }
}

impl SceIoDevInfo {
    // 在内存中的大小，也是devctl输出缓冲区的长度
    pub const SIZE: usize = size_of::<Self>();

    // 已使用的容量
    pub fn used_size(&self) -> SceOff {
        self.max_size.saturating_sub(self.free_size).max(0)
    }

    // 从devctl的输出缓冲区解析。64位主机上结构体中间有填充，不能直接视为字节数组
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        // 缓冲区内的字节都已初始化，且read_unaligned不要求对齐
        Some(unsafe { ptr::read_unaligned(bytes.as_ptr() as *const Self) })
    }

    // 按内存布局逐个字段写出，填充部分为0
    pub fn to_bytes(&self) -> [u8; SceIoDevInfo::SIZE] {
        let mut bytes = [0u8; SceIoDevInfo::SIZE];
        bytes[0..8].copy_from_slice(&self.max_size.to_ne_bytes());
        bytes[8..16].copy_from_slice(&self.free_size.to_ne_bytes());
        bytes[16..20].copy_from_slice(&self.cluster_size.to_ne_bytes());
        let unk = Self::SIZE - size_of::<usize>();
        bytes[unk..].copy_from_slice(&(self.unk as usize).to_ne_bytes());
        bytes
    }
}

/// 异步调用的参数块。内核没有实现异步调用，这里只做透传。
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SceIoAsyncParam {
    // 调用结果
    pub result: i32,
    pub unk_04: i32,
    pub unk_08: i32,
    pub unk_0c: i32,
}
