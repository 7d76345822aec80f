use criterion::{BatchSize, Criterion, Throughput};
use picohttp::network::application::http::{Client, Request};
use picohttp::network::error::Error;
use picohttp::network::{Available, Connection, Read, Write};
use picohttp::system::Scheduler;
use std::hint::black_box;

/// Loopback socket that answers every request with a canned response.
struct CannedConnection {
    response: &'static [u8],
    pending: &'static [u8],
}

impl CannedConnection {
    fn new(response: &'static [u8]) -> Self {
        Self {
            response,
            pending: &[],
        }
    }
}

impl Read for CannedConnection {
    type Error = Error;
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let len = buf.len().min(self.pending.len());
        buf[..len].copy_from_slice(&self.pending[..len]);
        self.pending = &self.pending[len..];
        Ok(len)
    }
}

impl Write for CannedConnection {
    type Error = Error;
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.pending = self.response;
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl Available for CannedConnection {
    type Error = Error;
    fn available(&mut self) -> Result<usize, Self::Error> {
        Ok(self.pending.len())
    }

    fn discard(&mut self) -> Result<(), Self::Error> {
        self.pending = &[];
        Ok(())
    }
}

impl Connection for CannedConnection {}

struct Spin;

impl Scheduler for Spin {
    fn yield_tick(&mut self) {}
}

const OK: &[u8] = b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 30\r\n\r\n{\"temp\":21.5,\"unit\":\"C\",\"n\":1}";

pub fn bench_request_encode(c: &mut Criterion) {
    let body = [b'x'; 512];
    let request = Request::post(
        "sensors.local",
        "/api/v1/readings",
        "X-Device: 42\r\n",
        "application/octet-stream",
        &body,
    );
    let mut buf = vec![0u8; request.encoded_len()];
    c.bench_function("request_encode", |b| {
        b.iter(|| black_box(&request).encode(&mut buf).expect("Failed to encode"))
    });
}

pub fn bench_get_split(c: &mut Criterion) {
    let mut client = Client::new(CannedConnection::new(OK), Spin);
    let mut group = c.benchmark_group("get");
    group.throughput(Throughput::Bytes(OK.len() as u64));
    group.bench_function("get_split", |b| {
        b.iter(|| {
            let mut header = [0u8; 128];
            let mut body = [0u8; 64];
            let response = client
                .get("sensors.local", "/latest", "", &mut header, &mut body, 100)
                .expect("Failed to get");
            black_box(response.status_code);
        })
    });
    group.finish();
}

pub fn bench_post_large_body(c: &mut Criterion) {
    let payload = vec![b'a'; 3000];
    let mut group = c.benchmark_group("post");
    group.throughput(Throughput::Bytes(payload.len() as u64));
    group.bench_function("post_3000", |b| {
        b.iter_batched_ref(
            || Client::new(CannedConnection::new(OK), Spin),
            |client| {
                let mut header = [0u8; 128];
                let mut body = [0u8; 64];
                let response = client
                    .post(
                        "sensors.local",
                        "/upload",
                        "",
                        "application/octet-stream",
                        &payload,
                        &mut header,
                        &mut body,
                        100,
                    )
                    .expect("Failed to post");
                black_box(response.status_code);
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}
