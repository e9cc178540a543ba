pub const CREATE_ALERTAS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS alertas (
    id_alerta INTEGER PRIMARY KEY AUTOINCREMENT,
    titulo TEXT NOT NULL,
    tipo_alerta TEXT NOT NULL,
    nivel_alerta TEXT NOT NULL,
    sector_afectado TEXT NOT NULL,
    descripcion_detallada TEXT NOT NULL,
    instrucciones_seguridad TEXT,
    imagen_url TEXT,
    fecha_creacion TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
);
"#;

pub const CREATE_USUARIOS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS usuarios (
    id_usuario INTEGER PRIMARY KEY AUTOINCREMENT,
    nombre TEXT NOT NULL,
    cedula TEXT NOT NULL UNIQUE,
    telefono TEXT,
    email TEXT,
    direccion TEXT,
    password TEXT NOT NULL,
    estado TEXT NOT NULL DEFAULT 'activo'
);
"#;

// Alerts

pub const INSERT_ALERTA: &str = r#"
INSERT INTO alertas (
    titulo, tipo_alerta, nivel_alerta, sector_afectado,
    descripcion_detallada, instrucciones_seguridad, imagen_url
) VALUES ($1, $2, $3, $4, $5, $6, $7);
"#;

pub const SELECT_ALERTAS: &str = r#"
SELECT id_alerta, titulo, tipo_alerta, nivel_alerta, sector_afectado,
       descripcion_detallada, instrucciones_seguridad, imagen_url, fecha_creacion
FROM alertas
ORDER BY fecha_creacion DESC, id_alerta DESC;
"#;

pub const SELECT_ALERTA_BY_ID: &str = r#"
SELECT id_alerta, titulo, tipo_alerta, nivel_alerta, sector_afectado,
       descripcion_detallada, instrucciones_seguridad, imagen_url, fecha_creacion
FROM alertas
WHERE id_alerta = $1;
"#;

pub const SEARCH_ALERTAS_BY_TITULO: &str = r#"
SELECT id_alerta, titulo, tipo_alerta, nivel_alerta, sector_afectado,
       descripcion_detallada, instrucciones_seguridad, imagen_url, fecha_creacion
FROM alertas
WHERE titulo LIKE $1 ESCAPE '\'
ORDER BY fecha_creacion DESC, id_alerta DESC;
"#;

pub const UPDATE_ALERTA: &str = r#"
UPDATE alertas
SET titulo = $1,
    tipo_alerta = $2,
    nivel_alerta = $3,
    sector_afectado = $4,
    descripcion_detallada = $5,
    instrucciones_seguridad = $6,
    imagen_url = $7
WHERE id_alerta = $8;
"#;

pub const DELETE_ALERTA: &str = r#"
DELETE FROM alertas WHERE id_alerta = $1;
"#;

pub const COUNT_ALERTAS: &str = r#"
SELECT COUNT(*) FROM alertas;
"#;

// Users. `password` and `direccion` are never selected back.

pub const INSERT_USUARIO: &str = r#"
INSERT INTO usuarios (nombre, cedula, telefono, email, direccion, password)
VALUES ($1, $2, $3, $4, $5, $6);
"#;

pub const SELECT_CREDENCIALES_ACTIVAS: &str = r#"
SELECT id_usuario, nombre, cedula, telefono, email, estado, password
FROM usuarios
WHERE cedula = $1 AND estado = 'activo';
"#;

pub const EXISTS_CEDULA: &str = r#"
SELECT EXISTS(SELECT 1 FROM usuarios WHERE cedula = $1);
"#;

pub const SELECT_USUARIOS_ACTIVOS: &str = r#"
SELECT id_usuario, nombre, cedula, telefono, email, estado
FROM usuarios
WHERE estado = 'activo'
ORDER BY nombre;
"#;

pub const SELECT_USUARIO_ACTIVO_BY_CEDULA: &str = r#"
SELECT id_usuario, nombre, cedula, telefono, email, estado
FROM usuarios
WHERE cedula = $1 AND estado = 'activo';
"#;

pub const SEARCH_USUARIOS_ACTIVOS: &str = r#"
SELECT id_usuario, nombre, cedula, telefono, email, estado
FROM usuarios
WHERE estado = 'activo'
  AND (nombre LIKE $1 ESCAPE '\' OR cedula LIKE $2 ESCAPE '\' OR email LIKE $3 ESCAPE '\')
ORDER BY nombre;
"#;

pub const UPDATE_USUARIO: &str = r#"
UPDATE usuarios
SET nombre = $1,
    telefono = $2,
    email = $3
WHERE id_usuario = $4;
"#;

pub const SOFT_DELETE_USUARIO: &str = r#"
UPDATE usuarios SET estado = 'inactivo' WHERE id_usuario = $1;
"#;

pub const COUNT_USUARIOS_ACTIVOS: &str = r#"
SELECT COUNT(*) FROM usuarios WHERE estado = 'activo';
"#;

/// Wraps `term` in `%` markers, escaping LIKE metacharacters so the term
/// matches as a literal substring.
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern(""), "%%");
        assert_eq!(like_pattern("María"), "%María%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
