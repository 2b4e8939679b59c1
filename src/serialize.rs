//! On-disk format (§4.6): magic, version, lengths, then the persisted
//! tables in a fixed little-endian layout. Hand-rolled rather than built
//! on `serde`/`bincode`, matching the rest of this lineage, so the wire
//! format is the one actually documented here, not whatever a derive's
//! field order happens to produce.

use std::io::{Read, Write};

use crate::bitvec::BitVector;
use crate::error::LoadError;
use crate::index::Index;
use crate::rank::RankMap;

const MAGIC: u32 = 0x5341_434b; // "SACK"
const VERSION: u16 = 1;

fn write_u16<W: Write>(w: &mut W, v: u16) -> std::io::Result<()> {
    w.write_all(&v.to_le_bytes())
}

fn write_u32<W: Write>(w: &mut W, v: u32) -> std::io::Result<()> {
    w.write_all(&v.to_le_bytes())
}

fn write_u64<W: Write>(w: &mut W, v: u64) -> std::io::Result<()> {
    w.write_all(&v.to_le_bytes())
}

fn read_u16<R: Read>(r: &mut R) -> std::io::Result<u16> {
    let mut buf = [0u8; 2];
    r.read_exact(&mut buf)?;
    Ok(u16::from_le_bytes(buf))
}

fn read_u32<R: Read>(r: &mut R) -> std::io::Result<u32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

fn read_u64<R: Read>(r: &mut R) -> std::io::Result<u64> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

impl<R: RankMap> Index<R> {
    /// Write this index to `writer` in the format of §4.6. The caller's
    /// rank map is not persisted — `load` takes it as a parameter, exactly
    /// as `build` does.
    pub fn save<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        write_u32(writer, MAGIC)?;
        write_u16(writer, VERSION)?;
        write_u64(writer, self.len())?;
        write_u64(writer, self.alphabet_size())?;
        write_u64(writer, self.sample_rate())?;
        write_u64(writer, self.primary_index())?;

        for &c in &self.c_table {
            write_u64(writer, c)?;
        }

        let n = self.len() as usize;
        let marked_bytes = (n + 7) / 8;
        let mut marked_buf = vec![0u8; marked_bytes];
        for i in 0..n {
            if self.marked.get(i) {
                marked_buf[i / 8] |= 1 << (i % 8);
            }
        }
        writer.write_all(&marked_buf)?;

        for &occ_word in &self.occ {
            write_u64(writer, occ_word)?;
        }

        write_u64(writer, self.locate_table.len() as u64)?;
        for &(bwt_pos, text_pos) in &self.locate_table {
            write_u64(writer, bwt_pos)?;
            write_u64(writer, text_pos)?;
        }

        writer.write_all(&self.bwt)?;
        Ok(())
    }

    /// Read an index previously written by [`Index::save`]. `rank_map`
    /// must be the same map (or an equivalent one) used at build time;
    /// it is not itself part of the wire format.
    pub fn load<Rd: Read>(reader: &mut Rd, rank_map: R) -> Result<Index<R>, LoadError> {
        let magic = read_u32(reader)?;
        if magic != MAGIC {
            return Err(LoadError::CorruptIndex);
        }
        let version = read_u16(reader)?;
        if version != VERSION {
            return Err(LoadError::CorruptIndex);
        }

        let n = read_u64(reader)?;
        let k = read_u64(reader)?;
        let sample_rate = read_u64(reader)?;
        let primary_index = read_u64(reader)?;
        if n == 0 || k == 0 || !sample_rate.is_power_of_two() || primary_index >= n {
            return Err(LoadError::CorruptIndex);
        }

        let mut c_table = Vec::with_capacity(k as usize);
        for _ in 0..k {
            c_table.push(read_u64(reader)?);
        }
        if c_table[0] != 0 {
            return Err(LoadError::CorruptIndex);
        }

        let marked_bytes = ((n as usize) + 7) / 8;
        let mut marked_buf = vec![0u8; marked_bytes];
        reader.read_exact(&mut marked_buf)?;
        let mut marked = BitVector::new();
        for i in 0..n as usize {
            marked.push(marked_buf[i / 8] & (1 << (i % 8)) != 0);
        }
        marked.build_index();

        let occ_rows = ((n + sample_rate - 1) / sample_rate) as usize;
        let mut occ = Vec::with_capacity(occ_rows * k as usize);
        for _ in 0..occ_rows * k as usize {
            occ.push(read_u64(reader)?);
        }

        let locate_len = read_u64(reader)?;
        let mut locate_table = Vec::with_capacity(locate_len as usize);
        let mut prev: Option<u64> = None;
        for _ in 0..locate_len {
            let bwt_pos = read_u64(reader)?;
            let text_pos = read_u64(reader)?;
            if let Some(p) = prev {
                if bwt_pos <= p {
                    return Err(LoadError::CorruptIndex);
                }
            }
            prev = Some(bwt_pos);
            if !marked.get(bwt_pos as usize) {
                return Err(LoadError::CorruptIndex);
            }
            locate_table.push((bwt_pos, text_pos));
        }

        let mut bwt = vec![0u8; n as usize];
        reader.read_exact(&mut bwt)?;

        Ok(Index::from_parts(
            n,
            k,
            sample_rate,
            primary_index,
            c_table,
            occ,
            locate_table,
            marked,
            bwt,
            rank_map,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rank::ByteRankMap;

    fn phi() -> ByteRankMap {
        ByteRankMap::from_ordered_alphabet(b"$abn")
    }

    #[test]
    fn round_trip_preserves_queries() {
        let text = b"banaananana$";
        let built = Index::build(text, phi(), 4).unwrap();

        let mut buf = Vec::new();
        built.save(&mut buf).unwrap();

        let mut cursor = &buf[..];
        let loaded = Index::load(&mut cursor, phi()).unwrap();

        assert_eq!(loaded.len(), built.len());
        assert_eq!(loaded.primary_index(), built.primary_index());
        assert_eq!(loaded.bwt(), built.bwt());
        for i in 0..text.len() as u64 {
            assert_eq!(loaded.locate(i), built.locate(i));
        }
    }

    #[test]
    fn rejects_bad_magic() {
        let mut buf = vec![0u8; 64];
        buf[0] = 0xff;
        let mut cursor = &buf[..];
        assert!(matches!(
            Index::load(&mut cursor, phi()),
            Err(LoadError::CorruptIndex)
        ));
    }

    #[test]
    fn tempfile_round_trip() {
        let text = b"banana$";
        let built = Index::build(text, phi(), 1).unwrap();

        let mut file = tempfile::tempfile().unwrap();
        built.save(&mut file).unwrap();
        use std::io::{Seek, SeekFrom};
        file.seek(SeekFrom::Start(0)).unwrap();
        let loaded = Index::load(&mut file, phi()).unwrap();

        for i in 0..text.len() as u64 {
            assert_eq!(loaded.locate(i), built.locate(i));
        }
    }
}
