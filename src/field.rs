use crate::error::Error;




/**
 * A read-only view of a caller-owned flat field buffer: a sequence of tuples,
 * each holding `num_fields` scalar components, tuples laid out in the
 * lexicographic cell order of some grid (axis 0 fastest, components
 * innermost). The transfer kernels never allocate, resize, or retain these
 * views; they borrow the caller's storage for the duration of one call.
 */
#[derive(Clone, Copy, Debug)]
pub struct Field<'a, T> {
    data: &'a [T],
    num_fields: usize,
}




impl<'a, T> Field<'a, T> {


    pub fn new(data: &'a [T], num_fields: usize) -> Result<Self, Error> {
        if num_fields == 0 {
            return Err(Error::InvalidComponentCount(num_fields));
        }
        Ok(Self { data, num_fields })
    }


    pub fn num_fields(&self) -> usize {
        self.num_fields
    }


    /**
     * Return the number of whole tuples in the buffer.
     */
    pub fn num_tuples(&self) -> usize {
        self.data.len() / self.num_fields
    }


    pub fn len(&self) -> usize {
        self.data.len()
    }


    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }


    pub fn data(&self) -> &'a [T] {
        self.data
    }


    /**
     * Return the components of one tuple by its lexicographic cell index.
     */
    pub fn tuple(&self, index: usize) -> &'a [T] {
        &self.data[index * self.num_fields..(index + 1) * self.num_fields]
    }
}




/**
 * A mutable view of a caller-owned flat field buffer, with the same layout
 * contract as `Field`.
 */
#[derive(Debug)]
pub struct FieldMut<'a, T> {
    data: &'a mut [T],
    num_fields: usize,
}




impl<'a, T> FieldMut<'a, T> {


    pub fn new(data: &'a mut [T], num_fields: usize) -> Result<Self, Error> {
        if num_fields == 0 {
            return Err(Error::InvalidComponentCount(num_fields));
        }
        Ok(Self { data, num_fields })
    }


    pub fn num_fields(&self) -> usize {
        self.num_fields
    }


    pub fn num_tuples(&self) -> usize {
        self.data.len() / self.num_fields
    }


    pub fn len(&self) -> usize {
        self.data.len()
    }


    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }


    pub fn data_mut(&mut self) -> &mut [T] {
        self.data
    }


    pub fn tuple_mut(&mut self, index: usize) -> &mut [T] {
        &mut self.data[index * self.num_fields..(index + 1) * self.num_fields]
    }
}
