use std::future::Future;
use std::io::{self, BufRead};

use tokio::io::{AsyncBufRead, Lines};
use tokio::sync::mpsc;

/// Where the interactive menu reads its answers from. `Ok(None)` is end of input.
pub trait LineSource {
    fn next_line(&mut self) -> impl Future<Output = io::Result<Option<String>>>;
}

impl<R> LineSource for Lines<R>
where
    R: AsyncBufRead + Unpin,
{
    async fn next_line(&mut self) -> io::Result<Option<String>> {
        Lines::next_line(self).await
    }
}

impl LineSource for mpsc::Receiver<io::Result<String>> {
    async fn next_line(&mut self) -> io::Result<Option<String>> {
        self.recv().await.transpose()
    }
}

/// Reads the terminal with blocking stdin on a dedicated thread and hands
/// lines over one at a time. The thread ends on end of input, on a read error
/// or once the receiver is dropped.
pub fn spawn_stdin_lines() -> io::Result<mpsc::Receiver<io::Result<String>>> {
    let (sender, receiver) = mpsc::channel(1);
    std::thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let failed = line.is_err();
                if sender.blocking_send(line).is_err() || failed {
                    break;
                }
            }
        })?;
    Ok(receiver)
}
