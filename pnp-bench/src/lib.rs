//! Inputs shared by the `pnp-webui` benchmarks

/// Perf data for `n` interfaces, two metrics each, like a busy switch check would report
pub fn perf_data(n: usize) -> String {
    (0..n)
        .map(|i| format!("if{}_in={}c;;;0; if{}_out={}c;;;0;", i, i * 1024, i, i * 512))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Image urls that already carry a size, that don't, and that only carry part of one
pub const URLS: &[(&str, &str)] = &[
    (
        "replace",
        "http://pnp.example.com/pnp4nagios/index.php/image?view=0&start=1000&end=4600&source=0&host=web-1&srv=_HOST_&graph_width=42&graph_height=42",
    ),
    (
        "append",
        "http://pnp.example.com/pnp4nagios/index.php/image?view=0&start=1000&end=4600&source=0&host=web-1&srv=_HOST_",
    ),
    (
        "mixed",
        "http://pnp.example.com/pnp4nagios/index.php/image?view=0&graph_width=42&start=1000&end=4600&source=0",
    ),
];
