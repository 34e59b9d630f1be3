//! Pages served by the mocked conversion service

/// A result page shaped like the one of the conversion service
pub fn result_page(coordinates_cell: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html><head><meta charset="utf-8"><title>Převod S-JTSK</title></head>
<body><form method="post" action="jtsk.php">
<table class="prevod">
<tr><td>Y</td><td><input name="yjtsk" value="742600"></td></tr>
<tr><td>X</td><td><input name="xjtsk" value="1043170"></td></tr>
<tr><td>Bpv</td><td>1</td></tr>
<tr><td>WGS84</td><td>{coordinates_cell}</td></tr>
</table></form></body></html>"#
    )
}
