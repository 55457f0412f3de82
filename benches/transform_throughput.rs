//! Transformation throughput benchmarks
//!
//! Measures compiling a mapping and applying it to documents with a varying
//! number of repeated elements (1, 10, 100, 1000).
//!
//! Run benchmarks: `cargo bench --bench transform_throughput`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use xmlmap::ConverterBuilder;
use xmlmap::mapping::compile_mapping_str;

const FIELDMAP: &str = r#"
<dmidecode_fieldmap version="1">
  <Mapping name="memory">
    <Map keytype="constant" key="Locators" valuetype="list:string" value="//Device/Locator"/>
    <Map keytype="constant" key="Sizes" valuetype="list:integer" value="//Device/Size"
         filter="//Device/Size/@unit" filtervalue="MB"/>
    <Map keytype="constant" key="ByLocator" valuetype="dict">
      <Map keytype="string" key="//Device/Locator" valuetype="integer" value="//Device/Size"/>
    </Map>
  </Mapping>
</dmidecode_fieldmap>
"#;

fn generate_document(devices: usize) -> String {
    let mut xml = String::from("<dmidecode><Memory>");
    for i in 0..devices {
        xml.push_str(&format!(
            r#"<Device><Locator>DIMM{}</Locator><Size unit="MB">{}</Size></Device>"#,
            i,
            1024 * (i % 8 + 1)
        ));
    }
    xml.push_str("</Memory></dmidecode>");
    xml
}

fn benchmark_compile(c: &mut Criterion) {
    c.bench_function("compile_mapping", |b| {
        b.iter(|| compile_mapping_str(black_box(FIELDMAP), "memory"))
    });
}

fn benchmark_transform_throughput(c: &mut Criterion) {
    let converter = match ConverterBuilder::new()
        .with_mapping_source(FIELDMAP)
        .with_schema("memory")
        .build()
    {
        Ok(converter) => converter,
        Err(e) => panic!("benchmark mapping failed to compile: {}", e),
    };

    let mut group = c.benchmark_group("transform_throughput");
    for count in [1, 10, 100, 1000] {
        let xml = generate_document(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("devices", count), &xml, |b, xml| {
            b.iter(|| converter.convert_str(black_box(xml)))
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_compile, benchmark_transform_throughput);
criterion_main!(benches);
