//! 内核文件I/O接口的抽象
//!
//! `IoBackend`的每个方法对应一个内核函数，参数换成了Rust的引用和切片，
//! 返回值保持内核的原始返回值，由上层解析。
//! 在设备上由`KernelBackend`实现，在主机上可用`mock::MockBackend`代替。

use crate::types::*;
use alloc::sync::Arc;
use core::ffi::CStr;
use lazy_static::*;
use spin::Mutex;

pub trait IoBackend: Send + Sync {
    fn remove(&self, path: &CStr) -> i32;
    fn mkdir(&self, path: &CStr, mode: SceIoMode) -> i32;
    fn rmdir(&self, path: &CStr) -> i32;
    fn rename(&self, old: &CStr, new: &CStr) -> i32;
    // arg为空时不发送数据，buf为空时不接收数据
    fn devctl(&self, dev: &CStr, cmd: i32, arg: &[u8], buf: &mut [u8]) -> i32;
    fn sync(&self, dev: &CStr, flag: i32) -> i32;
    // 成功时返回文件描述符
    fn open(&self, path: &CStr, flags: i32, mode: SceIoMode) -> SceUID;
    fn close(&self, fd: SceUID) -> i32;
    fn lseek(&self, fd: SceUID, offset: SceOff, whence: i32) -> SceOff;
    fn read(&self, fd: SceUID, buf: &mut [u8]) -> SceSSize;
    fn write(&self, fd: SceUID, buf: &[u8]) -> SceSSize;
    fn pread(&self, fd: SceUID, buf: &mut [u8], offset: SceOff) -> SceSSize;
    fn pwrite(&self, fd: SceUID, buf: &[u8], offset: SceOff) -> SceSSize;
    fn sync_by_fd(&self, fd: SceUID, flag: i32) -> i32;
    fn ioctl_async(
        &self,
        fd: SceUID,
        cmd: i32,
        arg: &[u8],
        buf: &mut [u8],
        param: &mut SceIoAsyncParam,
    ) -> i32;
    fn devctl_async(
        &self,
        dev: &CStr,
        cmd: i32,
        arg: &[u8],
        buf: &mut [u8],
        param: &mut SceIoAsyncParam,
    ) -> i32;
    // path为None时传NULL
    fn mount(&self, id: i32, path: Option<&CStr>, permission: i32, args: [i32; 3]) -> i32;
    fn umount(&self, id: i32, args: [i32; 3]) -> i32;
}

#[cfg(target_os = "vita")]
fn default_backend() -> Option<Arc<dyn IoBackend>> {
    Some(Arc::new(KernelBackend))
}

#[cfg(not(target_os = "vita"))]
fn default_backend() -> Option<Arc<dyn IoBackend>> {
    None
}

lazy_static! {
    // 全局默认的后端。在设备上默认是内核，在主机上需要先调用install_backend
    static ref GLOBAL_BACKEND: Mutex<Option<Arc<dyn IoBackend>>> = Mutex::new(default_backend());
}

// 替换全局默认的后端，返回原来的后端
pub fn install_backend(backend: Arc<dyn IoBackend>) -> Option<Arc<dyn IoBackend>> {
    GLOBAL_BACKEND.lock().replace(backend)
}

pub(crate) fn global_backend() -> Option<Arc<dyn IoBackend>> {
    GLOBAL_BACKEND.lock().clone()
}

#[cfg(target_os = "vita")]
pub use kernel::KernelBackend;

#[cfg(target_os = "vita")]
mod kernel {
    use super::IoBackend;
    use crate::ffi::*;
    use crate::types::*;
    use core::ffi::{c_void, CStr};
    use core::ptr;

    // 直接调用内核函数的后端
    pub struct KernelBackend;

    // 空切片对应NULL
    fn in_ptr(buf: &[u8]) -> *const c_void {
        if buf.is_empty() {
            ptr::null()
        } else {
            buf.as_ptr() as *const c_void
        }
    }

    fn out_ptr(buf: &mut [u8]) -> *mut c_void {
        if buf.is_empty() {
            ptr::null_mut()
        } else {
            buf.as_mut_ptr() as *mut c_void
        }
    }

    // 上层已经检查过长度不超过SceSize
    fn len(buf: &[u8]) -> SceSize {
        buf.len() as SceSize
    }

    impl IoBackend for KernelBackend {
        fn remove(&self, path: &CStr) -> i32 {
            unsafe { ksceIoRemove(path.as_ptr()) }
        }

        fn mkdir(&self, path: &CStr, mode: SceIoMode) -> i32 {
            unsafe { ksceIoMkdir(path.as_ptr(), mode) }
        }

        fn rmdir(&self, path: &CStr) -> i32 {
            unsafe { ksceIoRmdir(path.as_ptr()) }
        }

        fn rename(&self, old: &CStr, new: &CStr) -> i32 {
            unsafe { ksceIoRename(old.as_ptr(), new.as_ptr()) }
        }

        fn devctl(&self, dev: &CStr, cmd: i32, arg: &[u8], buf: &mut [u8]) -> i32 {
            let buflen = len(buf);
            unsafe { ksceIoDevctl(dev.as_ptr(), cmd, in_ptr(arg), len(arg), out_ptr(buf), buflen) }
        }

        fn sync(&self, dev: &CStr, flag: i32) -> i32 {
            unsafe { ksceIoSync(dev.as_ptr(), flag) }
        }

        fn open(&self, path: &CStr, flags: i32, mode: SceIoMode) -> SceUID {
            unsafe { ksceIoOpen(path.as_ptr(), flags, mode) }
        }

        fn close(&self, fd: SceUID) -> i32 {
            unsafe { ksceIoClose(fd) }
        }

        fn lseek(&self, fd: SceUID, offset: SceOff, whence: i32) -> SceOff {
            unsafe { ksceIoLseek(fd, offset, whence) }
        }

        fn read(&self, fd: SceUID, buf: &mut [u8]) -> SceSSize {
            let nbyte = len(buf);
            unsafe { ksceIoRead(fd, out_ptr(buf), nbyte) }
        }

        fn write(&self, fd: SceUID, buf: &[u8]) -> SceSSize {
            unsafe { ksceIoWrite(fd, in_ptr(buf), len(buf)) }
        }

        fn pread(&self, fd: SceUID, buf: &mut [u8], offset: SceOff) -> SceSSize {
            let nbyte = len(buf);
            unsafe { ksceIoPread(fd, out_ptr(buf), nbyte, offset) }
        }

        fn pwrite(&self, fd: SceUID, buf: &[u8], offset: SceOff) -> SceSSize {
            unsafe { ksceIoPwrite(fd, in_ptr(buf), len(buf), offset) }
        }

        fn sync_by_fd(&self, fd: SceUID, flag: i32) -> i32 {
            unsafe { ksceIoSyncByFd(fd, flag) }
        }

        fn ioctl_async(
            &self,
            fd: SceUID,
            cmd: i32,
            arg: &[u8],
            buf: &mut [u8],
            param: &mut SceIoAsyncParam,
        ) -> i32 {
            let buflen = len(buf);
            unsafe { ksceIoIoctlAsync(fd, cmd, in_ptr(arg), len(arg), out_ptr(buf), buflen, param) }
        }

        fn devctl_async(
            &self,
            dev: &CStr,
            cmd: i32,
            arg: &[u8],
            buf: &mut [u8],
            param: &mut SceIoAsyncParam,
        ) -> i32 {
            let buflen = len(buf);
            unsafe {
                ksceIoDevctlAsync(
                    dev.as_ptr(),
                    cmd,
                    in_ptr(arg),
                    len(arg),
                    out_ptr(buf),
                    buflen,
                    param,
                )
            }
        }

        fn mount(&self, id: i32, path: Option<&CStr>, permission: i32, args: [i32; 3]) -> i32 {
            let path = path.map_or(ptr::null(), |p| p.as_ptr());
            unsafe { ksceIoMount(id, path, permission, args[0], args[1], args[2]) }
        }

        fn umount(&self, id: i32, args: [i32; 3]) -> i32 {
            unsafe { ksceIoUmount(id, args[0], args[1], args[2]) }
        }
    }
}
