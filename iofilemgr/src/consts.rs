//! 内核头文件中的常量，名字和数值与SDK保持一致
//!
//! 带类型的封装见`OpenFlags`、`IoMode`、`DeviceType`和`SeekFrom`。

// 设备类型
pub const SCE_D_TYPE_NULL: i32 = 0x0; // 哑设备
pub const SCE_D_TYPE_CHAR: i32 = 0x1; // 字符设备
pub const SCE_D_TYPE_BLOCK: i32 = 0x4; // 块设备
pub const SCE_D_TYPE_FS: i32 = 0x10; // 文件系统
pub const SCE_D_TYPE_ALIAS: i32 = 0x20; // 设备别名
pub const SCE_D_TYPE_MOUNTPT: i32 = 0x40; // 挂载点别名

// 文件标志
pub const SCE_FREAD: i32 = 0x0001; // 可读
pub const SCE_FWRITE: i32 = 0x0002; // 可写
pub const SCE_FNBLOCK: i32 = 0x0004; // 保留：非阻塞读
pub const SCE_FDIRO: i32 = 0x0008; // 内部使用（dopen）
pub const SCE_FRLOCK: i32 = 0x0010; // 保留：读锁（不共享）
pub const SCE_FWLOCK: i32 = 0x0020; // 保留：写锁（不共享）
pub const SCE_FAPPEND: i32 = 0x0100; // 每次写入都追加到末尾
pub const SCE_FCREAT: i32 = 0x0200; // 不存在则创建
pub const SCE_FTRUNC: i32 = 0x0400; // 截断为0长度
pub const SCE_EXCL: i32 = 0x0800; // 排他创建
pub const SCE_FSCAN: i32 = 0x1000; // 保留：扫描类型
pub const SCE_FRCOM: i32 = 0x2000; // 保留：远程命令
pub const SCE_FNBUF: i32 = 0x4000; // 不使用设备缓冲
pub const SCE_FASYNC: i32 = 0x8000; // 保留：异步I/O
pub const SCE_FFDEXCL: i32 = 0x0100_0000; // 排他访问
pub const SCE_FPWLOCK: i32 = 0x0200_0000; // 电源控制锁
pub const SCE_FGAMEDATA: i32 = 0x4000_0000;

// ksceIoOpen的flag参数
pub const SCE_O_RDONLY: i32 = SCE_FREAD;
pub const SCE_O_WRONLY: i32 = SCE_FWRITE;
pub const SCE_O_RDWR: i32 = SCE_FREAD | SCE_FWRITE;
pub const SCE_O_NBLOCK: i32 = SCE_FNBLOCK;
pub const SCE_O_APPEND: i32 = SCE_FAPPEND;
pub const SCE_O_CREAT: i32 = SCE_FCREAT;
pub const SCE_O_TRUNC: i32 = SCE_FTRUNC;
pub const SCE_O_EXCL: i32 = SCE_EXCL;
pub const SCE_O_NOBUF: i32 = SCE_FNBUF;
pub const SCE_O_NOWAIT: i32 = SCE_FASYNC;
pub const SCE_O_FDEXCL: i32 = SCE_FFDEXCL;
pub const SCE_O_PWLOCK: i32 = SCE_FPWLOCK;
pub const SCE_O_FGAMEDATA: i32 = SCE_FGAMEDATA;

// ksceIoLseek的whence参数
pub const SCE_SEEK_SET: i32 = 0;
pub const SCE_SEEK_CUR: i32 = 1;
pub const SCE_SEEK_END: i32 = 2;

// 路径
pub const SCE_IO_MAX_PATH_BUFFER_SIZE: usize = 1024; // 路径缓冲区的最大字节数
pub const SCE_IO_MAX_PATH_LENGTH: usize = 200; // 路径的最大长度

// 访问权限位（SceIoMode）
pub const SCE_S_IXOTH: i32 = 0x0001;
pub const SCE_S_IWOTH: i32 = 0x0002;
pub const SCE_S_IROTH: i32 = 0x0004;
pub const SCE_S_IXSYS: i32 = 0x0008;
pub const SCE_S_IWSYS: i32 = 0x0010;
pub const SCE_S_IRSYS: i32 = 0x0020;
pub const SCE_S_IXUSR: i32 = 0x0040;
pub const SCE_S_IWUSR: i32 = 0x0080;
pub const SCE_S_IRUSR: i32 = 0x0100;
pub const SCE_S_IRWXO: i32 = SCE_S_IROTH | SCE_S_IWOTH | SCE_S_IXOTH;
pub const SCE_S_IRWXS: i32 = SCE_S_IRSYS | SCE_S_IWSYS | SCE_S_IXSYS;
pub const SCE_S_IRWXU: i32 = SCE_S_IRUSR | SCE_S_IWUSR | SCE_S_IXUSR;

// 文件类型位
pub const SCE_S_IFMT: i32 = 0xF000;
pub const SCE_S_IFLNK: i32 = 0x4000;
pub const SCE_S_IFDIR: i32 = 0x1000;
pub const SCE_S_IFREG: i32 = 0x2000;

// ksceIoDevctl命令：查询设备容量，输出SceIoDevInfo
pub const SCE_IO_DEVCTL_GET_DEV_INFO: i32 = 0x3001;

// 返回值
// errno类错误码：0x80010000 | errno
pub const SCE_ERROR_ERRNO_BASE: u32 = 0x8001_0000;
// ksceIoIoctlAsync和ksceIoDevctlAsync总是返回它
pub const SCE_KERNEL_ERROR_UNSUP: u32 = 0x8002_0004;
