// Copyright 2024 gridex
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! End-to-end scenarios: files go into a chunk store, come back out through
//! an index directory and are read through inputs, slices and clones.

#[cfg(test)]
mod tests {
    use std::{
        io::{Read, Seek, SeekFrom},
        sync::Arc,
    };

    use byteorder::{BigEndian, WriteBytesExt};
    use gridex_input::ChunkedInput;
    use gridex_store::{
        ensure_valid, ChunkStore, Error as StoreError, IndexDirectory, MemChunkStore,
        MemLockService, StoreConfig,
    };
    use gridex_utils::logger::install_fmt_log;
    use lazy_static::lazy_static;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    lazy_static! {
        /// A compound file: a header followed by three sub-files.
        static ref COMPOUND: (Vec<u8>, Vec<(&'static str, u64, u64)>) = {
            let parts: [(&str, Vec<u8>); 3] = [
                ("_0.fdt", (0..37u8).collect()),
                ("_0.tim", (100..=200u8).collect()),
                ("_0.doc", vec![0xab; 3]),
            ];
            let mut buf = Vec::new();
            buf.write_i32::<BigEndian>(0x3fd7_6c17).unwrap();
            buf.write_i16::<BigEndian>(parts.len() as i16).unwrap();
            let mut entries = Vec::new();
            for (name, bytes) in &parts {
                let offset = buf.len() as u64 + 8;
                buf.write_i64::<BigEndian>(bytes.len() as i64).unwrap();
                buf.extend_from_slice(bytes);
                entries.push((*name, offset, bytes.len() as u64));
            }
            (buf, entries)
        };
    }

    fn directory(chunk_size: u32) -> (Arc<MemChunkStore>, Arc<MemLockService>, IndexDirectory) {
        install_fmt_log();
        let config = StoreConfig {
            prefix: "indexes/products".to_string(),
            chunk_size,
        };
        let store = Arc::new(MemChunkStore::new(config.chunk_size));
        let locks = Arc::new(MemLockService::new());
        let dir = IndexDirectory::new(&config, store.clone(), locks.clone()).unwrap();
        (store, locks, dir)
    }

    #[test]
    fn compound_file_through_slices() {
        let (data, entries) = &*COMPOUND;
        // odd chunk size so every value straddles some boundary
        let (store, _, dir) = directory(5);
        store.put("indexes/products/_0.cfs", data.clone());

        let mut cfs = dir.open_input("_0.cfs").unwrap();
        assert_eq!(cfs.len(), data.len() as u64);
        assert_eq!(cfs.read_int().unwrap(), 0x3fd7_6c17);
        assert_eq!(cfs.read_short().unwrap(), 3);

        for (name, offset, length) in entries {
            let stored = cfs.read_long().unwrap() as u64;
            assert_eq!(stored, *length);
            assert_eq!(cfs.tell().unwrap(), *offset);

            let mut sub = cfs.slice(name, *offset, *length).unwrap();
            assert_eq!(
                sub.description(),
                format!("ChunkedInput(file=\"indexes/products/_0.cfs\") [slice={name}]")
            );
            let mut bytes = vec![0; *length as usize];
            sub.read_bytes(&mut bytes).unwrap();
            assert_eq!(&bytes[..], &data[*offset as usize..(*offset + *length) as usize]);
            assert!(sub.read_byte().unwrap_err().is_end_of_input());

            cfs.seek(offset + length).unwrap();
        }
        assert_eq!(cfs.tell().unwrap(), cfs.len());
        assert!(cfs.read_byte().unwrap_err().is_end_of_input());
    }

    #[test]
    fn positional_matches_stored_bytes() {
        let mut rng = StdRng::seed_from_u64(42);
        for round in 0..20 {
            let length = rng.gen_range(0..400usize);
            let chunk_size = rng.gen_range(1..64u32);
            let data: Vec<u8> = (0..length).map(|_| rng.gen()).collect();

            let (store, _, dir) = directory(chunk_size);
            let name = format!("_{round}.dat");
            store.put(&format!("indexes/products/{name}"), data.clone());
            let input = dir.open_input(&name).unwrap();

            for pos in 0..length {
                assert_eq!(input.read_byte_at(pos as u64).unwrap(), data[pos]);
            }
            assert!(input
                .read_byte_at(length as u64)
                .unwrap_err()
                .is_end_of_input());

            if length == 0 {
                continue;
            }
            // nested slices keep addressing the same bytes
            let offset = rng.gen_range(0..length as u64);
            let sub_len = rng.gen_range(0..=length as u64 - offset);
            let outer = input.slice("outer", offset, sub_len).unwrap();
            let inner_off = rng.gen_range(0..=sub_len);
            let inner = outer.slice("inner", inner_off, sub_len - inner_off).unwrap();
            for i in 0..inner.len() {
                assert_eq!(
                    inner.read_byte_at(i).unwrap(),
                    data[(offset + inner_off + i) as usize]
                );
            }
            for pos in 0..sub_len.saturating_sub(7) {
                let expected = i64::from_be_bytes(
                    data[(offset + pos) as usize..(offset + pos + 8) as usize]
                        .try_into()
                        .unwrap(),
                );
                assert_eq!(outer.read_long_at(pos).unwrap(), expected);
            }
        }
    }

    #[test]
    fn clones_read_in_parallel() {
        let data: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
        let (store, _, dir) = directory(333);
        store.put("indexes/products/big", data.clone());
        let input = dir.open_input("big").unwrap();

        std::thread::scope(|s| {
            for t in 0..4u64 {
                let mut clone = input.try_clone().unwrap();
                let data = &data;
                s.spawn(move || {
                    let start = t * 2000;
                    clone.seek(start).unwrap();
                    let mut buf = vec![0; 2500];
                    clone.read_bytes(&mut buf).unwrap();
                    assert_eq!(&buf[..], &data[start as usize..start as usize + 2500]);
                    clone.close();
                });
            }
        });
        // the source is untouched by its clones
        assert_eq!(input.tell().unwrap(), 0);
        assert!(!input.is_closed());
    }

    #[test]
    fn io_adapters() {
        let data: Vec<u8> = (0..50u8).collect();
        let (store, _, dir) = directory(8);
        store.put("indexes/products/seg", data.clone());
        let mut input = dir.open_input("seg").unwrap();

        let mut all = Vec::new();
        input.read_to_end(&mut all).unwrap();
        assert_eq!(all, data);

        Seek::seek(&mut input, SeekFrom::End(-10)).unwrap();
        let mut tail = [0; 10];
        input.read_exact(&mut tail).unwrap();
        assert_eq!(&tail[..], &data[40..]);

        let err = Seek::seek(&mut input, SeekFrom::Current(-51)).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
        assert_eq!(input.tell().unwrap(), 50);

        input.close();
        let err = input.read(&mut tail).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn directory_lifecycle() {
        let (store, locks, dir) = directory(16);
        store.put("indexes/products/segments_1", vec![1u8; 20]);
        store.put("indexes/products/_0.cfs", vec![2u8; 40]);

        let lock = dir.obtain_lock("write.lock").unwrap();
        ensure_valid(lock.as_ref()).unwrap();

        dir.rename_file("segments_1", "segments_2").unwrap();
        assert_eq!(dir.list_all().unwrap(), vec!["_0.cfs", "segments_2"]);
        assert!(matches!(
            dir.rename_file("_0.cfs", "segments_2").unwrap_err(),
            StoreError::FileExists { .. }
        ));

        let mut input = dir.open_input("_0.cfs").unwrap();
        let slice = input.slice("body", 4, 32).unwrap();
        dir.delete_file("_0.cfs").unwrap();
        assert!(dir.open_input("_0.cfs").unwrap_err().is_not_found());
        // already-open inputs keep their chunks
        assert_eq!(input.read_long().unwrap(), 0x0202_0202_0202_0202);

        input.close();
        assert!(input.read_byte().unwrap_err().is_already_closed());
        assert_eq!(slice.read_byte_at(31).unwrap(), 2);

        // someone else removes our lock
        assert!(locks.break_lock("indexes/products/write.lock"));
        assert!(ensure_valid(lock.as_ref()).is_err());
        assert!(lock.release().is_err());

        dir.close();
        assert!(matches!(
            dir.list_all().unwrap_err(),
            StoreError::DirectoryClosed { .. }
        ));
        assert_eq!(store.list("indexes/products/").unwrap().len(), 1);
    }

    #[test]
    fn layouts_rejected_at_construction() {
        let chunks = vec![bytes::Bytes::from_static(b"abc"), bytes::Bytes::from_static(b"d")];
        let err = ChunkedInput::new("bad", chunks, 4, 4).unwrap_err();
        assert!(err.is_invalid_argument());
    }
}
