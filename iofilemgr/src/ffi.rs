//! SceIofilemgrForDriver导出的函数原型
//!
//! 这些函数实现在内核中，通过桩库`SceIofilemgrForDriver_stub`链接。
//! 除ksceIoOpen返回文件描述符、ksceIoLseek返回新位置外，返回值< 0即错误码。

#![allow(non_snake_case)]
use crate::types::*;
use core::ffi::{c_char, c_int, c_void};

#[link(name = "SceIofilemgrForDriver_stub", kind = "static")]
extern "C" {
    // 删除目录项
    pub fn ksceIoRemove(filename: *const c_char) -> c_int;
    // 创建目录
    pub fn ksceIoMkdir(dirname: *const c_char, mode: SceIoMode) -> c_int;
    // 删除目录
    pub fn ksceIoRmdir(dirname: *const c_char) -> c_int;
    // 重命名
    pub fn ksceIoRename(oldname: *const c_char, newname: *const c_char) -> c_int;
    // 向设备发送devctl命令。arg/bufp为NULL或长度为0时，不发送/不接收数据
    pub fn ksceIoDevctl(
        devname: *const c_char,
        cmd: c_int,
        arg: *const c_void,
        arglen: SceSize,
        bufp: *mut c_void,
        buflen: SceSize,
    ) -> c_int;
    // 将设备上的数据写回存储
    pub fn ksceIoSync(devname: *const c_char, flag: c_int) -> c_int;
    // 打开或创建文件，成功时返回非负的文件描述符
    pub fn ksceIoOpen(filename: *const c_char, flag: c_int, mode: SceIoMode) -> SceUID;
    pub fn ksceIoClose(fd: SceUID) -> c_int;
    // 返回移动后的位置
    pub fn ksceIoLseek(fd: SceUID, offset: SceOff, whence: c_int) -> SceOff;
    pub fn ksceIoRead(fd: SceUID, buf: *mut c_void, nbyte: SceSize) -> SceSSize;
    pub fn ksceIoWrite(fd: SceUID, buf: *const c_void, nbyte: SceSize) -> SceSSize;
    pub fn ksceIoPread(fd: SceUID, buf: *mut c_void, nbyte: SceSize, offset: SceOff) -> SceSSize;
    pub fn ksceIoPwrite(
        fd: SceUID,
        buf: *const c_void,
        nbyte: SceSize,
        offset: SceOff,
    ) -> SceSSize;
    pub fn ksceIoSyncByFd(fd: SceUID, flag: c_int) -> c_int;
    // 未实现，总是返回SCE_KERNEL_ERROR_UNSUP
    pub fn ksceIoIoctlAsync(
        fd: SceUID,
        cmd: c_int,
        argp: *const c_void,
        arglen: SceSize,
        bufp: *mut c_void,
        buflen: SceSize,
        async_param: *mut SceIoAsyncParam,
    ) -> c_int;
    // 未实现，总是返回SCE_KERNEL_ERROR_UNSUP
    pub fn ksceIoDevctlAsync(
        devname: *const c_char,
        cmd: c_int,
        arg: *const c_void,
        arglen: SceSize,
        bufp: *mut c_void,
        buflen: SceSize,
        async_param: *mut SceIoAsyncParam,
    ) -> c_int;
    // 挂载设备。a4~a6含义未知，传0
    pub fn ksceIoMount(
        id: c_int,
        path: *const c_char,
        permission: c_int,
        a4: c_int,
        a5: c_int,
        a6: c_int,
    ) -> c_int;
    // 卸载设备。a2~a4含义未知，传0
    pub fn ksceIoUmount(id: c_int, a2: c_int, a3: c_int, a4: c_int) -> c_int;
}
