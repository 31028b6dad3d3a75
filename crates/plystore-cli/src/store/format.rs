// crates/plystore-cli/src/store/format.rs

use anyhow::{Context, Result};
use plystore_core::checksum::crc32;
use plystore_core::ChunkChain;

use super::StoredElement;

pub const MAGIC_PLYR: [u8; 4] = *b"PLYR";
pub const PLYR_VERSION: u8 = 1;

const FLAG_ZSTD: u8 = 0x01;

/// PLYR record layout (little-endian):
/// MAGIC[4]
/// version:u8
/// flags:u8               (bit0: body is zstd-compressed)
/// body_len:u32
/// body[body_len]
/// crc32:u32              (over everything before crc32)
///
/// Body:
/// header_len:u32 header[header_len]
/// element_count:u32
/// repeated {
///   name_len:u16 name[name_len]
///   count:u64
///   max_chunk:u32
///   chunk_count:u32
///   repeated { len:u32 bytes[len] }
/// }
#[derive(Clone, Debug)]
pub struct PlyRecord {
    pub header_text: String,
    pub elements: Vec<StoredElement>,
}

impl PlyRecord {
    pub fn encode(header_text: &str, elements: &[StoredElement], zstd_level: i32) -> Result<Vec<u8>> {
        let mut body = Vec::new();

        put_u32_len(&mut body, header_text.len())?;
        body.extend_from_slice(header_text.as_bytes());

        put_u32_len(&mut body, elements.len())?;
        for e in elements {
            let name_len = u16::try_from(e.type_name.len()).context("element name too long")?;
            body.extend_from_slice(&name_len.to_le_bytes());
            body.extend_from_slice(e.type_name.as_bytes());
            body.extend_from_slice(&e.count.to_le_bytes());
            put_u32_len(&mut body, e.max_chunk_size)?;
            put_u32_len(&mut body, e.chain.chunk_count())?;

            let last = e.chain.chunk_count() - 1;
            for (i, c) in e.chain.iter().enumerate() {
                check_chunk_len(&e.type_name, i, last, c.len(), e.max_chunk_size)?;
                put_u32_len(&mut body, c.len())?;
                body.extend_from_slice(c);
            }
        }

        let mut flags = 0u8;
        if zstd_level > 0 {
            body = zstd::encode_all(&body[..], zstd_level).context("zstd compress")?;
            flags |= FLAG_ZSTD;
        }

        let mut out = Vec::with_capacity(4 + 1 + 1 + 4 + body.len() + 4);
        out.extend_from_slice(&MAGIC_PLYR);
        out.push(PLYR_VERSION);
        out.push(flags);
        put_u32_len(&mut out, body.len())?;
        out.extend_from_slice(&body);

        let crc = crc32(&out);
        out.extend_from_slice(&crc.to_le_bytes());
        Ok(out)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut p = Parser::new(bytes);

        let magic: [u8; 4] = p.take_array()?;
        anyhow::ensure!(magic == MAGIC_PLYR, "PLYR bad magic");

        let ver = p.take_u8()?;
        anyhow::ensure!(ver == PLYR_VERSION, "PLYR unsupported version {ver}");

        let flags = p.take_u8()?;
        anyhow::ensure!(flags & !FLAG_ZSTD == 0, "PLYR unknown flags 0x{flags:02x}");

        let raw_body = p.take_vec_u32_len()?;

        let got_crc = p.take_u32()?;
        let want_crc = crc32(&bytes[..bytes.len().saturating_sub(4)]);
        anyhow::ensure!(got_crc == want_crc, "PLYR crc mismatch");

        anyhow::ensure!(p.is_eof(), "PLYR trailing bytes");

        let body = if flags & FLAG_ZSTD != 0 {
            zstd::decode_all(&raw_body[..]).context("zstd decompress")?
        } else {
            raw_body
        };

        decode_body(&body)
    }
}

fn decode_body(body: &[u8]) -> Result<PlyRecord> {
    let mut p = Parser::new(body);

    let header_text = String::from_utf8(p.take_vec_u32_len()?).context("header is not utf-8")?;

    let element_count = p.take_u32()? as usize;
    let mut elements = Vec::new();
    for _ in 0..element_count {
        let name_len = p.take_u16()? as usize;
        let type_name = std::str::from_utf8(p.take_exact(name_len)?)
            .context("element name is not utf-8")?
            .to_owned();
        let count = p.take_u64()?;
        let max_chunk_size = p.take_u32()? as usize;
        anyhow::ensure!(max_chunk_size >= 1, "element '{type_name}' has zero max_chunk");

        let chunk_count = p.take_u32()? as usize;
        anyhow::ensure!(chunk_count >= 1, "element '{type_name}' has no chunks");

        let mut chunks = Vec::new();
        for i in 0..chunk_count {
            let len = p.take_u32()? as usize;
            let c = p.take_exact(len)?;
            check_chunk_len(&type_name, i, chunk_count - 1, c.len(), max_chunk_size)?;
            chunks.push(c);
        }

        let chain = ChunkChain::build(&chunks)?;
        elements.push(StoredElement {
            type_name,
            count,
            max_chunk_size,
            chain,
        });
    }

    anyhow::ensure!(p.is_eof(), "PLYR body trailing bytes");

    Ok(PlyRecord {
        header_text,
        elements,
    })
}

fn check_chunk_len(name: &str, i: usize, last: usize, len: usize, max: usize) -> Result<()> {
    anyhow::ensure!(
        len <= max,
        "element '{name}' chunk {i} holds {len} bytes, max is {max}"
    );
    anyhow::ensure!(
        i == last || len == max,
        "element '{name}' chunk {i} is short ({len} of {max} bytes) but not last"
    );
    Ok(())
}

fn put_u32_len(out: &mut Vec<u8>, n: usize) -> Result<()> {
    let n = u32::try_from(n).context("length does not fit u32")?;
    out.extend_from_slice(&n.to_le_bytes());
    Ok(())
}

/// Little-endian cursor over a record; every read is bounds-checked.
struct Parser<'a> {
    b: &'a [u8],
    i: usize,
}

impl<'a> Parser<'a> {
    fn new(b: &'a [u8]) -> Self {
        Self { b, i: 0 }
    }

    fn is_eof(&self) -> bool {
        self.i == self.b.len()
    }

    fn take_exact(&mut self, n: usize) -> Result<&'a [u8]> {
        let rest = &self.b[self.i..];
        anyhow::ensure!(
            n <= rest.len(),
            "unexpected EOF at byte {}: need {n}, have {}",
            self.i,
            rest.len()
        );
        self.i += n;
        Ok(&rest[..n])
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take_exact(N)?);
        Ok(out)
    }

    fn take_u8(&mut self) -> Result<u8> {
        Ok(self.take_array::<1>()?[0])
    }

    fn take_u16(&mut self) -> Result<u16> {
        self.take_array().map(u16::from_le_bytes)
    }

    fn take_u32(&mut self) -> Result<u32> {
        self.take_array().map(u32::from_le_bytes)
    }

    fn take_u64(&mut self) -> Result<u64> {
        self.take_array().map(u64::from_le_bytes)
    }

    fn take_vec_u32_len(&mut self) -> Result<Vec<u8>> {
        let n = self.take_u32()? as usize;
        Ok(self.take_exact(n)?.to_vec())
    }
}
