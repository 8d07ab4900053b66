//! # Pool de Workers de Conexiones
//! src/server/pool.rs
//!
//! Pool acotado de threads que atienden conexiones aceptadas. El acceptor
//! encola cada `TcpStream` y alguno de los N workers lo desencola y corre
//! el dispatcher contra él.
//!
//! La cola NO tiene límite de capacidad: si los N workers están ocupados,
//! las conexiones esperan encoladas. Es una limitación conocida del
//! diseño (sin backpressure ni rechazo), no algo a "arreglar" acá.

use crate::server::dispatcher::Dispatcher;
use std::collections::VecDeque;
use std::net::TcpStream;
use std::sync::{Arc, Condvar, Mutex};
use std::thread;

/// Cola FIFO thread-safe de conexiones aceptadas
///
/// Mutex + Condvar: los workers bloquean en `dequeue` hasta que el
/// acceptor encole algo.
pub struct ConnectionQueue {
    queue: Mutex<VecDeque<TcpStream>>,
    condvar: Condvar,
}

impl ConnectionQueue {
    /// Crea una cola vacía
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            condvar: Condvar::new(),
        }
    }

    /// Encola una conexión y despierta a un worker
    ///
    /// Nunca falla ni bloquea: la cola es ilimitada.
    pub fn enqueue(&self, stream: TcpStream) {
        let mut queue = self.queue.lock().unwrap();
        queue.push_back(stream);
        self.condvar.notify_one();
    }

    /// Desencola la conexión más vieja
    ///
    /// Bloquea hasta que haya una conexión disponible.
    pub fn dequeue(&self) -> TcpStream {
        let mut queue = self.queue.lock().unwrap();

        loop {
            if let Some(stream) = queue.pop_front() {
                return stream;
            }

            // Esperar a que el acceptor encole algo
            queue = self.condvar.wait(queue).unwrap();
        }
    }

    /// Cantidad de conexiones esperando
    pub fn len(&self) -> usize {
        let queue = self.queue.lock().unwrap();
        queue.len()
    }

    /// Verifica si la cola está vacía
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ConnectionQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Pool acotado de workers que corren el dispatcher
pub struct WorkerPool {
    queue: Arc<ConnectionQueue>,
}

impl WorkerPool {
    /// Arranca `workers` threads que atienden la cola para siempre
    ///
    /// Cada worker es independiente: un error en una conexión se loguea
    /// y el worker sigue con la próxima.
    pub fn start(workers: usize, dispatcher: Arc<Dispatcher>) -> Self {
        let queue = Arc::new(ConnectionQueue::new());

        for i in 0..workers {
            let queue = Arc::clone(&queue);
            let dispatcher = Arc::clone(&dispatcher);
            let name = format!("edge-worker-{}", i);

            thread::Builder::new()
                .name(name.clone())
                .spawn(move || {
                    Self::worker_loop(&name, queue, dispatcher);
                })
                .expect("No se pudo crear el thread del worker");
        }

        Self { queue }
    }

    /// Loop principal del worker
    fn worker_loop(name: &str, queue: Arc<ConnectionQueue>, dispatcher: Arc<Dispatcher>) {
        println!("🔧 Worker {} started", name);

        loop {
            let stream = queue.dequeue();

            if let Err(e) = dispatcher.handle(stream) {
                eprintln!("   ❌ Error en {}: {}", name, e);
            }
        }
    }

    /// Encola una conexión para que la tome algún worker
    pub fn submit(&self, stream: TcpStream) {
        self.queue.enqueue(stream);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    /// Helper: crea un par de streams conectados vía un listener efímero
    fn stream_pair() -> (TcpStream, TcpStream) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().unwrap();

        let client = TcpStream::connect(addr).unwrap();
        let (server_side, _) = listener.accept().unwrap();

        (client, server_side)
    }

    #[test]
    fn test_queue_starts_empty() {
        let queue = ConnectionQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn test_queue_enqueue_dequeue() {
        let queue = ConnectionQueue::new();
        let (_client, server_side) = stream_pair();

        queue.enqueue(server_side);
        assert_eq!(queue.len(), 1);

        // Con algo encolado, dequeue no bloquea
        let _stream = queue.dequeue();
        assert!(queue.is_empty());
    }

    #[test]
    fn test_queue_is_fifo() {
        let queue = ConnectionQueue::new();

        let (_c1, s1) = stream_pair();
        let (_c2, s2) = stream_pair();
        let addr1 = s1.local_addr().unwrap();
        let addr2 = s2.local_addr().unwrap();
        assert_ne!(addr1, addr2);

        queue.enqueue(s1);
        queue.enqueue(s2);

        let first = queue.dequeue();
        let second = queue.dequeue();

        assert_eq!(first.local_addr().unwrap(), addr1);
        assert_eq!(second.local_addr().unwrap(), addr2);
    }

    #[test]
    fn test_blocking_dequeue_wakes_on_enqueue() {
        let queue = Arc::new(ConnectionQueue::new());

        let consumer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                // Bloquea hasta que el main encole
                let _stream = queue.dequeue();
            })
        };

        let (_client, server_side) = stream_pair();
        queue.enqueue(server_side);

        consumer.join().unwrap();
        assert!(queue.is_empty());
    }
}
