use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};

/// 使用 socket2 建立 TCP 連線 (TCP_NODELAY + keepalive)
///
/// 依序嘗試解析出的每個位址，回傳第一個成功的連線。
pub fn connect_tcp(host: &str, port: u16) -> io::Result<TcpStream> {
    let mut last_error = None;

    for addr in (host, port).to_socket_addrs()? {
        match open_stream(addr) {
            Ok(stream) => return Ok(stream),
            Err(e) => last_error = Some(e),
        }
    }

    Err(last_error.unwrap_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("no address resolved for {}:{}", host, port),
        )
    }))
}

fn open_stream(addr: SocketAddr) -> io::Result<TcpStream> {
    // socket() - 依位址族建立 socket
    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;

    // 一次只有一個請求在途中，關閉 Nagle 降低延遲
    socket.set_nodelay(true)?;
    socket.set_keepalive(true)?;

    // connect() - 阻塞直到連線建立
    socket.connect(&addr.into())?;

    Ok(socket.into())
}
